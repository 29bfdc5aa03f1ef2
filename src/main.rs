fn main() {
    use package_relations_explorer::cli::parse;
    let cli = parse();
    let code = package_relations_explorer::app::run_cli(cli);
    if code != 0 { std::process::exit(code); }
}
