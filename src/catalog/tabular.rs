//! Static character table loader.
//!
//! The first row names the columns. Column lookup ignores case and
//! surrounding whitespace for every field. Bad cells never fail the load:
//! stats fall back to zero, missing text falls back to a default, and rows
//! without a name or image are dropped.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::catalog::record::{CharacterRecord, StatBlock};
use crate::catalog::source::SourceError;

const DEFAULT_GENDER: &str = "Unknown";
const DEFAULT_ELEMENT: &str = "Void";
const DEFAULT_POSITION: &str = "MF";
const DEFAULT_TEAM: &str = "Unknown";

pub fn load_characters(path: &Path) -> Result<Vec<CharacterRecord>, SourceError> {
    let contents = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_characters(&contents)?;
    debug!(path = %path.display(), count = records.len(), "Loaded character table");
    Ok(records)
}

pub fn parse_characters(contents: &str) -> Result<Vec<CharacterRecord>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(sniff_delimiter(contents))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|err| SourceError::Csv(err.to_string()))?
        .iter()
        .map(normalize_header)
        .collect();

    let mut records = Vec::new();
    let mut seen_ids = HashSet::new();

    for (index, row) in reader.records().enumerate() {
        // +2: 1-based, after the header line
        let line = index + 2;
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                warn!(line, error = %err, "Skipping malformed character row");
                continue;
            }
        };

        let cells: HashMap<&str, &str> = headers
            .iter()
            .map(String::as_str)
            .zip(row.iter())
            .collect();

        let Some(record) = build_record(&RowLookup { cells }) else {
            debug!(line, "Skipping character row without name or image");
            continue;
        };

        if !seen_ids.insert(record.id.clone()) {
            warn!(line, id = %record.id, "Skipping character row with duplicate id");
            continue;
        }
        records.push(record);
    }

    Ok(records)
}

/// `;` when the header line has more semicolons than commas.
fn sniff_delimiter(contents: &str) -> u8 {
    let header = contents.lines().next().unwrap_or_default();
    let semicolons = header.matches(';').count();
    let commas = header.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_lowercase()
}

struct RowLookup<'a> {
    cells: HashMap<&'a str, &'a str>,
}

impl RowLookup<'_> {
    /// Non-blank cell for a column, whatever case the header used.
    fn text(&self, column: &str) -> Option<&str> {
        self.cells
            .get(normalize_header(column).as_str())
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    fn owned(&self, column: &str) -> Option<String> {
        self.text(column).map(str::to_string)
    }

    fn labelled(&self, column: &str) -> Option<String> {
        self.text(column).map(english_label)
    }

    fn stat(&self, column: &str) -> i32 {
        parse_stat(self.text(column))
    }
}

fn build_record(row: &RowLookup<'_>) -> Option<CharacterRecord> {
    let name = row.owned("Name")?;
    let image_url = row.owned("ImageURL")?;

    let stats = StatBlock {
        kick: row.stat("Kick"),
        control: row.stat("Control"),
        technique: row.stat("Technique"),
        pressure: row.stat("Pressure"),
        physical: row.stat("Physical"),
        agility: row.stat("Agility"),
        intelligence: row.stat("Intelligence"),
    };

    Some(CharacterRecord {
        id: row
            .owned("ID")
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        nickname: row.owned("Nickname").unwrap_or_else(|| name.clone()),
        name,
        image_url,
        gender: row
            .labelled("Gender")
            .unwrap_or_else(|| DEFAULT_GENDER.to_string()),
        element: row
            .labelled("Element")
            .unwrap_or_else(|| DEFAULT_ELEMENT.to_string()),
        position: row
            .owned("Position")
            .unwrap_or_else(|| DEFAULT_POSITION.to_string()),
        team: row
            .owned("Team")
            .unwrap_or_else(|| DEFAULT_TEAM.to_string()),
        stats,
        description: row.owned("Description"),
        how_to_obtain: row.owned("HowToObtain"),
        school_year: row.owned("SchoolYear"),
        age_group: row.owned("AgeGroup"),
        character_role: row.labelled("CharacterRole"),
    })
}

/// Integer, else a finite decimal truncated toward zero, else zero.
pub fn parse_stat(value: Option<&str>) -> i32 {
    let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return 0;
    };
    if let Ok(parsed) = raw.parse::<i32>() {
        return parsed;
    }
    match raw.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => parsed.trunc() as i32,
        _ => 0,
    }
}

/// `"男 (Male)"` becomes `"Male"`; anything else is returned trimmed.
pub fn english_label(value: &str) -> String {
    if let Some(open) = value.find('(') {
        if let Some(close) = value[open..].find(')') {
            let inner = value[open + 1..open + close].trim();
            if !inner.is_empty() {
                return inner.to_string();
            }
        }
    }
    value.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "ID,Name,Nickname,ImageURL,Gender,Element,Position,Team,Kick,Control,Technique,Pressure,Physical,Agility,Intelligence,Description,HowToObtain,SchoolYear,AgeGroup,CharacterRole";

    fn table(rows: &[&str]) -> String {
        let mut contents = String::from(HEADER);
        for row in rows {
            contents.push('\n');
            contents.push_str(row);
        }
        contents
    }

    #[test]
    fn parses_full_row() {
        let contents = table(&[
            "7,Axel Blaze,Blaze,https://img.test/axel.png,Male,Fire,FW,Raimon,90,70,75,60,72,80,65,Ace striker,Story,2nd,Junior,Player",
        ]);
        let records = parse_characters(&contents).expect("table parses");
        assert_eq!(records.len(), 1);

        let axel = &records[0];
        assert_eq!(axel.id, "7");
        assert_eq!(axel.nickname, "Blaze");
        assert_eq!(axel.team, "Raimon");
        assert_eq!(axel.stats.kick, 90);
        assert_eq!(axel.stats.intelligence, 65);
        assert_eq!(axel.description.as_deref(), Some("Ace striker"));
        assert_eq!(axel.school_year.as_deref(), Some("2nd"));
        assert_eq!(axel.character_role.as_deref(), Some("Player"));
    }

    #[test]
    fn rows_missing_name_or_image_are_excluded() {
        let contents = table(&[
            "1,,,https://img.test/a.png,Male,Fire,FW,Raimon,1,1,1,1,1,1,1,,,,,",
            "2,Nameless Image,,,Male,Fire,FW,Raimon,1,1,1,1,1,1,1,,,,,",
            "3,Kept,,https://img.test/c.png,Male,Fire,FW,Raimon,1,1,1,1,1,1,1,,,,,",
        ]);
        let records = parse_characters(&contents).expect("table parses");
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["3"]);
    }

    #[test]
    fn non_numeric_stats_become_zero() {
        let contents = table(&[
            "1,Jude,,https://img.test/j.png,Male,Wind,MF,Royal,abc,,12.9,-3, 44 ,NaN,inf,,,,,",
        ]);
        let records = parse_characters(&contents).expect("table parses");
        let stats = records[0].stats;
        assert_eq!(stats.kick, 0);
        assert_eq!(stats.control, 0);
        assert_eq!(stats.technique, 12);
        assert_eq!(stats.pressure, -3);
        assert_eq!(stats.physical, 44);
        assert_eq!(stats.agility, 0);
        assert_eq!(stats.intelligence, 0);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let contents = "Name,ImageURL\nShawn Frost,https://img.test/s.png\n";
        let records = parse_characters(contents).expect("table parses");
        let shawn = &records[0];

        assert_eq!(shawn.nickname, "Shawn Frost");
        assert_eq!(shawn.gender, "Unknown");
        assert_eq!(shawn.element, "Void");
        assert_eq!(shawn.position, "MF");
        assert_eq!(shawn.team, "Unknown");
        assert_eq!(shawn.stats, StatBlock::default());
        assert_eq!(shawn.description, None);
        assert!(Uuid::parse_str(&shawn.id).is_ok());
    }

    #[test]
    fn generated_ids_are_unique_per_row() {
        let contents = "Name,ImageURL\nA,a.png\nB,b.png\nC,c.png\n";
        let records = parse_characters(contents).expect("table parses");
        let ids: HashSet<_> = records.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn header_lookup_ignores_case_for_every_column() {
        let contents = "id,NAME,imageurl,ELEMENT,kick,characterrole\n9,Byron,b.png,Forest,88,Captain\n";
        let records = parse_characters(contents).expect("table parses");
        let byron = &records[0];
        assert_eq!(byron.id, "9");
        assert_eq!(byron.name, "Byron");
        assert_eq!(byron.element, "Forest");
        assert_eq!(byron.stats.kick, 88);
        assert_eq!(byron.character_role.as_deref(), Some("Captain"));
    }

    #[test]
    fn semicolon_tables_with_bilingual_labels() {
        let contents = "ID;Name;ImageURL;Gender;Element;CharacterRole\n\
                        1;Mark;m.png;男 (Male);山 (Mountain);選手 (Player)\n";
        let records = parse_characters(contents).expect("table parses");
        let mark = &records[0];
        assert_eq!(mark.gender, "Male");
        assert_eq!(mark.element, "Mountain");
        assert_eq!(mark.character_role.as_deref(), Some("Player"));
    }

    #[test]
    fn duplicate_ids_keep_the_first_row() {
        let contents = "ID,Name,ImageURL\n1,First,a.png\n1,Second,b.png\n";
        let records = parse_characters(contents).expect("table parses");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "First");
    }

    #[test]
    fn blank_and_short_rows_do_not_abort_the_load() {
        let contents = "ID,Name,ImageURL,Team\n\n1,Short,s.png\n2,Full,f.png,Zeus\n";
        let records = parse_characters(contents).expect("table parses");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].team, "Unknown");
        assert_eq!(records[1].team, "Zeus");
    }

    #[test]
    fn english_label_extracts_parenthesized_part() {
        assert_eq!(english_label("風 (Wind)"), "Wind");
        assert_eq!(english_label("Wind"), "Wind");
        assert_eq!(english_label("odd ()"), "odd ()");
    }

    #[test]
    fn load_from_file_and_missing_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "Name,ImageURL").expect("write header");
        writeln!(file, "Axel,a.png").expect("write row");

        let records = load_characters(file.path()).expect("file loads");
        assert_eq!(records.len(), 1);

        let missing = file.path().with_extension("missing");
        let err = load_characters(&missing).expect_err("missing file fails");
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
