use anyhow::Result;
use mdcollect::{cli::parse_args, run};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let (action, config) = parse_args()?;
    run(action, &config).await
}
