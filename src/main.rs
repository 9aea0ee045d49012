fn main() {
    if let Err(err) = sheetboard::run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
