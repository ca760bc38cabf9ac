use crate::cli::GlobalFlags;
use crate::cli::root_commands::CountiesArgs;
use crate::commands::{load, lookup};
use crate::context::AppContext;
use crate::output::output;

/// Handle `regio counties --province <name|code> --city <name|code>`.
pub async fn handle(
    args: &CountiesArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let provinces = load("provinces", ctx.resolver.provinces()).await?;
    let province = lookup::find(&provinces, &args.province, "province")?;

    let cities = load(&province.name, ctx.resolver.cities(province)).await?;
    let city = lookup::find(&cities, &args.city, "city")?;

    let counties = load(&city.name, ctx.resolver.counties(province, city)).await?;
    output(&counties, flags.format)
}
