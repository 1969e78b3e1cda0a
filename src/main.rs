fn main() {
    if let Err(err) = maf_toolkit::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
