#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = folio_site::run_from_env() {
        eprintln!("folio-demo: {error}");
        std::process::exit(error.exit_code());
    }
}
