use miette::Result;
use oro_sbom::OroSbom;

#[async_std::main]
async fn main() -> Result<()> {
    OroSbom::load().await
}
