mod cli;
mod display;

use anyhow::{Context, bail};
use chandler_api::MondayClient;
use chandler_core::{
    BoardId, ColumnRoleMap, ItemId, OptionValue, Order, OrderLine, UpdateFields,
    sort_by_last_update_desc,
};
use chandler_orders::{
    BoardConfig, CustomerList, CustomerMode, HostContext, LocalStore, OptionsSource, OrderService,
    Submitted, Submitter, candle_options, context_channel, list_customers,
};
use clap::Parser;
use serde_json::json;
use tracing::{Level, info};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    info!("chandler v{}", env!("CARGO_PKG_VERSION"));

    let ctx = host_context(&cli).await;
    let config = BoardConfig::new(cli.candles_board.as_deref(), cli.crm_board.as_deref());
    let api = MondayClient::new(cli.api_url.clone(), cli.token.clone());
    let service = OrderService::new(&api);

    match cli.command {
        Commands::Columns => {
            let board = require_board(&ctx)?;
            let roles = service.role_map(board).await?;
            display::print_roles(&roles);
        }
        Commands::Create {
            first,
            last,
            lines,
            new_customer,
        } => {
            let lines = lines
                .iter()
                .enumerate()
                .map(|(i, raw)| parse_line(i as u32 + 1, raw))
                .collect::<Vec<_>>();
            let order = Order::new(&first, &last, lines);

            let roles = match &ctx.board_id {
                Some(board) => service.role_map(board).await?,
                None => ColumnRoleMap::default(),
            };
            let local = LocalStore::open(&cli.local_dir)
                .with_context(|| format!("opening {}", cli.local_dir.display()))?;
            let mode = if new_customer {
                CustomerMode::New
            } else {
                CustomerMode::Returning
            };

            match Submitter::new(&api, &config, &local)
                .submit(&ctx, &roles, &order, mode)
                .await?
            {
                Submitted::Created(items) => {
                    println!(
                        "Created {} item(s) for {}",
                        items.len(),
                        order.order_number.as_str()
                    );
                    for item in items {
                        println!("  {}", item.id);
                    }
                }
                Submitted::SavedLocally => {
                    println!("No board in context; saved order to {}", cli.local_dir.display());
                }
            }
        }
        Commands::List => {
            let board = require_board(&ctx)?;
            let mut orders = service.list_created_orders(board).await?;
            sort_by_last_update_desc(&mut orders);
            display::print_orders(&orders);
        }
        Commands::Update {
            item,
            first,
            last,
            candle1,
            candle2,
            candle3,
            inscription,
        } => {
            let board = require_board(&ctx)?;
            let item = parse_item(&item)?;
            let roles = service.role_map(board).await?;
            let fields = UpdateFields {
                first_name: first,
                last_name: last,
                options: [candle1, candle2, candle3],
                inscription,
            };
            service.update_order(board, &item, &roles, &fields).await?;
            println!("Updated {item}");
        }
        Commands::Delete { item } => {
            let item = parse_item(&item)?;
            service.delete_order(&item).await?;
            println!("Deleted {item}");
        }
        Commands::Options => match candle_options(&api, &config).await? {
            OptionsSource::NotConfigured => println!("No candles board configured."),
            OptionsSource::Empty => println!("The candles board has no items."),
            OptionsSource::Board(options) => {
                for option in &options {
                    println!("{}", option.display());
                }
            }
        },
        Commands::Customers => match list_customers(&api, &config).await? {
            CustomerList::NotConfigured => println!("No CRM board configured."),
            CustomerList::Loaded(customers) => display::print_customers(&customers),
        },
        Commands::LastLocal => {
            let local = LocalStore::open(&cli.local_dir)?;
            match local.last_order()? {
                Some(order) => display::print_local_order(&order),
                None => println!("No order saved locally."),
            }
        }
    }

    Ok(())
}

/// Stand in for the embedding host: announce the context from the
/// environment and wait for it the way board-scoped work does.
async fn host_context(cli: &Cli) -> HostContext {
    let (publisher, mut listener) = context_channel();
    let payload = json!({
        "boardId": cli.board,
        "user": { "id": cli.user },
    });
    publisher.publish(HostContext::from_host_payload(&payload));
    listener.wait().await
}

fn require_board(ctx: &HostContext) -> anyhow::Result<&BoardId> {
    ctx.board_id
        .as_ref()
        .context("no orders board; set CHANDLER_BOARD_ID or pass --board")
}

fn parse_item(raw: &str) -> anyhow::Result<ItemId> {
    match ItemId::parse(raw) {
        Some(item) => Ok(item),
        None => bail!("item id must not be blank"),
    }
}

/// Parse "candle1,candle2,candle3[:inscription]". Blank or missing candles
/// stay unselected.
fn parse_line(id: u32, raw: &str) -> OrderLine {
    let (candles, inscription) = raw.split_once(':').unwrap_or((raw, ""));
    let mut line = OrderLine::new(id);
    for (slot, name) in candles.split(',').take(line.values.len()).enumerate() {
        let name = name.trim();
        if !name.is_empty() {
            line.values[slot] = Some(OptionValue::new(name));
        }
    }
    line.inscription = inscription.trim().to_string();
    line
}
