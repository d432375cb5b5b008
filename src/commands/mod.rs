// Cluster deployment commands
pub mod deploy;

// Development environment commands
pub mod stop;

use crate::Context;
use teardown::Client;

/// Build a teardown client from the resolved settings
pub fn client(ctx: &Context) -> Client {
    Client::with_programs(&ctx.settings.kubectl, &ctx.settings.docker)
}
