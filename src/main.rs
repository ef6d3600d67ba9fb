fn main() {
    if let Err(e) = clipclean_lib::run() {
        eprintln!("clipclean: {e}");
        std::process::exit(1);
    }
}
