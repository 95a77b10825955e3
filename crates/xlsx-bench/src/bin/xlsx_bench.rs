fn main() -> anyhow::Result<()> {
    xlsx_bench::cli::run()
}
