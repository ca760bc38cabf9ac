use crate::cli::GlobalFlags;
use crate::cli::root_commands::CitiesArgs;
use crate::commands::{load, lookup};
use crate::context::AppContext;
use crate::output::output;

/// Handle `regio cities --province <name|code>`.
pub async fn handle(args: &CitiesArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let provinces = load("provinces", ctx.resolver.provinces()).await?;
    let province = lookup::find(&provinces, &args.province, "province")?;

    let cities = load(&province.name, ctx.resolver.cities(province)).await?;
    output(&cities, flags.format)
}
