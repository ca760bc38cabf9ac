use crate::cli::GlobalFlags;
use crate::commands::load;
use crate::context::AppContext;
use crate::output::output;

/// Handle `regio provinces`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let provinces = load("provinces", ctx.resolver.provinces()).await?;
    output(&provinces, flags.format)
}
