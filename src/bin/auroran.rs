fn main() -> anyhow::Result<()> {
    auroran::cli::run_cli()
}
