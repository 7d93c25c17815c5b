//! Waiter console
//!
//! A line-oriented front end over the tab manager:
//!
//! ```text
//! login <email> <password>
//! list [term]
//! open <numero> <mesa> <nome> <email> <telefone>
//! add <numero> <produto-id> <quantidade>
//! close <numero>
//! stats
//! quit
//! ```

use comanda_desk::auth::AuthFlow;
use comanda_desk::customer::Catalog;
use comanda_desk::waiter::{TabManager, WaiterDashboard};
use comanda_desk::{DeskConfig, DeskError, Notification, Repositories, logger};
use shared::client::LoginForm;
use shared::models::{OpenTabForm, TabFilter, TabItem};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = DeskConfig::from_env();
    logger::init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;
    tracing::info!(backend = ?config.backend, "Comanda desk starting");

    let repos = Repositories::from_config(&config)?;
    let auth = AuthFlow::for_selector(Some("garcom"), &repos);
    let mut tabs = TabManager::new(repos.tabs.clone());
    if let Err(e) = tabs.refresh().await {
        // remote backends need a login first
        tracing::info!(error = %e, "Tabs not loaded yet");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let words: Vec<&str> = line.split_whitespace().collect();
        let result = match words.as_slice() {
            [] => continue,
            ["quit"] | ["exit"] => break,
            ["login", email, password] => login(&auth, &mut tabs, email, password).await,
            ["list", rest @ ..] => {
                let filter = TabFilter::search(rest.join(" "));
                for tab in tabs.list_tabs(&filter) {
                    let who = tab.customer.as_ref().map(|c| c.name.as_str()).unwrap_or("-");
                    println!("#{:>3}  {:?}  mesa {:>3}  {}  R$ {}", tab.number, tab.state, tab.table_number, who, tab.total());
                }
                Ok(())
            }
            ["open", number, table, name, email, phone] => {
                let form = OpenTabForm {
                    customer_name: name.to_string(),
                    email: email.to_string(),
                    phone: phone.to_string(),
                    table_number: table.to_string(),
                };
                match tab_id(&tabs, number) {
                    Ok(id) => tabs.open_tab(&id, &form).await.map(|tab| notify(&Notification::tab_opened(&tab))),
                    Err(e) => Err(e),
                }
            }
            ["add", number, product, quantity] => add_item(&repos, &mut tabs, number, product, quantity).await,
            ["close", number] => match tab_id(&tabs, number) {
                Ok(id) => tabs
                    .close_tab(&id)
                    .await
                    .map(|tab| notify(&Notification::tab_closed(tab.number))),
                Err(e) => Err(e),
            },
            ["stats"] => {
                let stats = tabs.stats();
                let kpi = WaiterDashboard::from_tabs(tabs.tabs());
                println!(
                    "livres {}  abertas {}  receita R$ {}  pedidos pendentes {}",
                    stats.free, stats.open, stats.revenue, kpi.pending_orders
                );
                Ok(())
            }
            _ => {
                println!("comandos: login, list, open, add, close, stats, quit");
                Ok(())
            }
        };
        if let Err(e) = result {
            notify(&Notification::from_error(&e));
        }
    }

    auth.logout();
    tracing::info!("Comanda desk stopped");
    Ok(())
}

fn notify(n: &Notification) {
    println!("[{}] {}", n.title, n.description);
}

fn tab_id(tabs: &TabManager, number: &str) -> Result<String, DeskError> {
    number
        .parse::<u32>()
        .ok()
        .and_then(|n| tabs.find_by_number(n))
        .map(|t| t.id.clone())
        .ok_or_else(|| shared::AppError::new(shared::ErrorCode::TabNotFound).with_detail("number", number).into())
}

async fn login(auth: &AuthFlow, tabs: &mut TabManager, email: &str, password: &str) -> Result<(), DeskError> {
    let form = LoginForm {
        email: email.to_string(),
        password: password.to_string(),
    };
    auth.login(form).await?;
    notify(&Notification::logged_in(auth.home()));
    tabs.refresh().await
}

async fn add_item(
    repos: &Repositories,
    tabs: &mut TabManager,
    number: &str,
    product: &str,
    quantity: &str,
) -> Result<(), DeskError> {
    let id = tab_id(tabs, number)?;
    let catalog = Catalog::load(repos.products.clone()).await?;
    let product = product
        .parse::<i64>()
        .ok()
        .and_then(|p| catalog.get(p))
        .ok_or_else(|| shared::AppError::new(shared::ErrorCode::ProductNotFound).with_detail("id", product))?;
    let quantity: u32 = quantity
        .parse()
        .map_err(|_| shared::AppError::validation("Quantity must be a positive integer"))?;
    let item = TabItem::new(product.id, product.name.clone(), product.price, quantity);
    let tab = tabs.add_item(&id, item).await?;
    println!("#{} total R$ {}", tab.number, tab.total());
    Ok(())
}
