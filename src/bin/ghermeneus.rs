use anyhow::Result;

fn main() -> Result<()> {
    ghermeneus::cli::run()
}
