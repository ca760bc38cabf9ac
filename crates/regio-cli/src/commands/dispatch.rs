use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Provinces => commands::provinces::handle(ctx, flags).await,
        Commands::Cities(args) => commands::cities::handle(&args, ctx, flags).await,
        Commands::Counties(args) => commands::counties::handle(&args, ctx, flags).await,
        Commands::Browse => commands::browse::handle(ctx, flags).await,
    }
}
