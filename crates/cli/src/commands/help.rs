pub fn run() {
    println!("Available commands:");
    println!();
    println!("  -find <query> <file>                      List matches with line:column");
    println!("  -replace-all <query> <text> <file>        Replace every occurrence (--write to save)");
    println!("  -count <file>                             Count characters, line breaks excluded");
    println!("  -version                                  Show version information");
    println!("  -help                                     Show this help message");
    println!("  -edit-config                              Open config file in editor");
    println!("  -show-config                              Display current configuration");
    println!("  -validate-config                          Validate configuration file");
    println!();
    println!("Matching options for -find and -replace-all:");
    println!("  --ignore-case                             Match regardless of letter case");
    println!("  --regex                                   Treat the query as a regular expression");
}
