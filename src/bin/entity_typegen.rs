fn main() {
    if let Err(err) = entity_typegen::cli::run_cli() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
