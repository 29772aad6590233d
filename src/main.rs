fn main() {
    use import_graph::cli::parse;
    let cli = parse();
    let code = import_graph::app::run_cli(cli);
    if code != 0 { std::process::exit(code); }
}
