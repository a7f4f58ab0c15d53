fn main() {
    if let Err(e) = scoutdex::cli::main() {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}
