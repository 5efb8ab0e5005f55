fn main() {
    if let Err(error) = cancelkit_cli::run() {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}
