fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tech_svg_generator::cli::env_log_filter())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = tech_svg_generator::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
