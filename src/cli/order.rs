//! `matcha order`

use std::io;

use clap::Args;
use tracing::debug;

use crate::{
    api::ServiceType,
    checkout::CheckoutDraft,
    cli::{CliError, item_spec::ItemSpec},
    context::AppContext,
    pricing,
};

/// Options for `matcha order`.
#[derive(Debug, Clone, Args)]
pub struct OrderArgs {
    /// Item to add: `<id>[,qty=N][,size=M|G][,milk=..][,prep=..][,extras=a+b][,protein=..]`
    #[arg(long = "item", short = 'i', required = true)]
    pub items: Vec<ItemSpec>,

    /// Customer name
    #[arg(long)]
    pub name: Option<String>,

    /// Service type (comer-aqui, para-llevar)
    #[arg(long, default_value = "comer-aqui")]
    pub service: ServiceType,

    /// General comments for the whole order
    #[arg(long)]
    pub comments: Option<String>,

    /// Print the request body instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

pub(crate) async fn run(
    context: &mut AppContext,
    args: OrderArgs,
    mut out: impl io::Write,
) -> Result<(), CliError> {
    context.load_menu().await?;

    for (index, item) in args.items.into_iter().enumerate() {
        let key = context
            .add_to_cart(item.product, item.selection)
            .await
            .map_err(|source| CliError::Add {
                position: index + 1,
                source,
            })?;

        debug!(%key, "added item");
    }

    let mut draft = CheckoutDraft::new(args.service);

    if let Some(name) = &args.name {
        draft = draft.with_customer_name(name);
    }

    if let Some(comments) = &args.comments {
        draft = draft.with_comments(comments);
    }

    context.summary(&draft).write_to(&mut out)?;

    if args.dry_run {
        let order = context.prepare(&draft)?;

        serde_json::to_writer_pretty(&mut out, order.request())?;
        writeln!(out)?;

        return Ok(());
    }

    let confirmation = context.checkout(&draft).await?;

    writeln!(out, "Pedido #{} creado.", confirmation.id)?;

    if let Some(total) = &confirmation.total {
        writeln!(out, "Total: {}", pricing::format_amount(total))?;
    }

    writeln!(out, "Favor de pasar a barra a pagar.")?;

    Ok(())
}
