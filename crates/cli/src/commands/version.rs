pub fn run() {
    println!("scribe {}", env!("CARGO_PKG_VERSION"));
}
