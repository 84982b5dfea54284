//! # Terminal Front End
//!
//! A line-oriented loop on stdin. It parses a command, calls the matching
//! function in [`commands`](crate::commands) and prints the result. It holds
//! no state of its own.
//!
//! ```text
//! till> add 7
//! Tea × 1                     3.50 S
//! Total: 3.50 S
//! till> clear
//! Are you sure you want to clear the cart? (yes/no)
//! till> yes
//! ```

use std::fmt::Write as _;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

use till_core::{
    ConfirmationRequest, Consent, Intent, Label, Locale, Money, Product, ProductId, Transaction,
    TransactionId, TransactionStatus,
};

use crate::commands::cart::CartView;
use crate::commands::confirm::Resolution;
use crate::commands::{cart, checkout, confirm, locale, product, receipt, transaction};
use crate::error::{RegisterError, RegisterResult};
use crate::session::Session;

const PROMPT: &str = "till> ";

const HELP: &str = "\
Catalog:   products | search <term> | lookup <term> | refresh
           add-product <price> <stock> <name> | deduct <id> <qty> | delete-product <id>
Cart:      add <id> | inc <id> | dec <id> | cart | clear
Checkout:  customer <name> | date <YYYY-MM-DD> | status <pending|completed|cancelled>
           preview | commit
History:   history | receipt <id> | delete-tx <id>
Other:     lang <en|ar|he> | yes | no | help | quit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Products,
    Search(String),
    Lookup(String),
    Refresh,
    AddProduct { name: String, price: Money, stock: i64 },
    Deduct { product_id: ProductId, quantity: i64 },
    DeleteProduct(ProductId),
    Add(ProductId),
    Inc(ProductId),
    Dec(ProductId),
    Cart,
    Clear,
    Customer(String),
    Date(String),
    Status(TransactionStatus),
    Preview,
    Commit,
    History,
    Receipt(TransactionId),
    DeleteTransaction(TransactionId),
    Lang(Locale),
    Answer(Consent),
    Help,
    Quit,
}

/// Parses one line. Blank lines parse to `None`.
pub fn parse_command(line: &str) -> RegisterResult<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "products" => Command::Products,
        "search" => Command::Search(rest.to_string()),
        "lookup" => Command::Lookup(rest.to_string()),
        "refresh" => Command::Refresh,
        "add-product" => {
            let mut parts = rest.splitn(3, char::is_whitespace);
            let price = parse_money(parts.next())?;
            let stock = parse_int(parts.next(), "stock")?;
            let name = parts.next().unwrap_or("").trim().to_string();
            Command::AddProduct { name, price, stock }
        }
        "deduct" => {
            let mut parts = rest.split_whitespace();
            let product_id = parse_int(parts.next(), "product id")?;
            let quantity = parse_int(parts.next(), "quantity")?;
            Command::Deduct {
                product_id,
                quantity,
            }
        }
        "delete-product" => Command::DeleteProduct(parse_int(Some(rest), "product id")?),
        "add" => Command::Add(parse_int(Some(rest), "product id")?),
        "inc" => Command::Inc(parse_int(Some(rest), "product id")?),
        "dec" => Command::Dec(parse_int(Some(rest), "product id")?),
        "cart" => Command::Cart,
        "clear" => Command::Clear,
        "customer" => Command::Customer(rest.to_string()),
        "date" => Command::Date(rest.to_string()),
        "status" => Command::Status(rest.parse()?),
        "preview" => Command::Preview,
        "commit" => Command::Commit,
        "history" => Command::History,
        "receipt" => Command::Receipt(parse_int(Some(rest), "transaction id")?),
        "delete-tx" => Command::DeleteTransaction(parse_int(Some(rest), "transaction id")?),
        "lang" => Command::Lang(rest.parse()?),
        "yes" | "y" => Command::Answer(Consent::Grant),
        "no" | "n" => Command::Answer(Consent::Deny),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => {
            return Err(RegisterError::validation(format!(
                "Unknown command '{}' (try 'help')",
                other
            )))
        }
    };

    Ok(Some(command))
}

fn parse_int(value: Option<&str>, field: &str) -> RegisterResult<i64> {
    let value = value.unwrap_or("").trim();
    value
        .parse()
        .map_err(|_| RegisterError::validation(format!("{} must be a whole number", field)))
}

fn parse_money(value: Option<&str>) -> RegisterResult<Money> {
    value
        .unwrap_or("")
        .trim()
        .parse()
        .map_err(|_| RegisterError::validation("price must be a number"))
}

// =============================================================================
// Loop
// =============================================================================

/// Reads commands from stdin until `quit` or end of input.
pub async fn run(session: &Session) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    stdout.write_all(HELP.as_bytes()).await?;
    stdout.write_all(b"\n").await?;

    loop {
        stdout.write_all(PROMPT.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                stdout.write_all(format!("{}\n", e).as_bytes()).await?;
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }

        let output = match execute(session, command).await {
            Ok(text) => text,
            Err(e) => e.to_string(),
        };
        stdout.write_all(output.as_bytes()).await?;
        if !output.ends_with('\n') {
            stdout.write_all(b"\n").await?;
        }
    }

    Ok(())
}

/// Runs one command and formats its result for the terminal.
pub async fn execute(session: &Session, command: Command) -> RegisterResult<String> {
    debug!(?command, "repl command");

    let text = match command {
        Command::Products => format_products(session, &product::list_products(session)),
        Command::Search(term) => format_products(session, &product::search_products(session, &term)?),
        Command::Lookup(term) => {
            format_products(session, &product::search_authority(session, &term).await?)
        }
        Command::Refresh => format_products(session, &product::refresh_catalog(session).await?),
        Command::AddProduct { name, price, stock } => {
            let saved = product::add_product(session, &name, price, stock).await?;
            format_products(session, &[saved])
        }
        Command::Deduct {
            product_id,
            quantity,
        } => {
            let updated = product::deduct_stock(session, product_id, quantity).await?;
            format_products(session, &[updated])
        }
        Command::DeleteProduct(id) => {
            ask(session, confirm::request_confirmation(session, Intent::DeleteProduct(id))?)
        }
        Command::Add(id) => format_cart(session, &cart::add_to_cart(session, id)?),
        Command::Inc(id) => format_cart(session, &cart::increment(session, id)?),
        Command::Dec(id) => format_cart(session, &cart::decrement(session, id)?),
        Command::Cart => format_cart(session, &cart::get_cart(session)),
        Command::Clear => ask(session, confirm::request_confirmation(session, Intent::ClearCart)?),
        Command::Customer(name) => {
            let meta = checkout::set_customer_name(session, &name)?;
            format!("{}: {}", session.locale().text(Label::CustomerName), meta.customer_name)
        }
        Command::Date(date) => {
            let meta = checkout::set_date(session, &date)?;
            format!("{}: {}", session.locale().text(Label::Date), meta.date_string())
        }
        Command::Status(status) => {
            let meta = checkout::set_status(session, status);
            format!(
                "{}: {}",
                session.locale().text(Label::Status),
                session.locale().text(meta.status.label())
            )
        }
        Command::Preview => receipt::render_preview(session),
        Command::Commit => {
            let outcome = checkout::commit(session).await?;
            receipt::render(session, &outcome.receipt)
        }
        Command::History => format_history(session, &transaction::list_transactions(session)),
        Command::Receipt(id) => receipt::render_transaction(session, id)?,
        Command::DeleteTransaction(id) => ask(
            session,
            confirm::request_confirmation(session, Intent::DeleteTransaction(id))?,
        ),
        Command::Lang(code) => locale::set_locale(session, code).code().to_string(),
        Command::Answer(consent) => {
            let pending = confirm::pending_confirmation(session)
                .ok_or_else(|| RegisterError::validation("Nothing to confirm"))?;
            let resolution = confirm::resolve_confirmation(session, pending.ticket, consent).await?;
            format_resolution(&resolution)
        }
        Command::Help => HELP.to_string(),
        Command::Quit => String::new(),
    };

    Ok(text)
}

// =============================================================================
// Formatting
// =============================================================================

fn ask(session: &Session, request: ConfirmationRequest) -> String {
    format!("{} (yes/no)", session.locale().text(request.prompt))
}

fn format_products(session: &Session, products: &[Product]) -> String {
    let config = session.config();
    let mut out = String::new();
    let _ = writeln!(out, "{}", session.locale().text(Label::AvailableProducts));
    for p in products {
        let _ = writeln!(
            out,
            "{:>5}  {:<24} {:>12}  {:>5}",
            p.id,
            p.name,
            config.format_currency(p.price),
            p.stock
        );
    }
    out
}

fn format_cart(session: &Session, view: &CartView) -> String {
    let config = session.config();
    let mut out = String::new();
    let _ = writeln!(out, "{}", session.locale().text(Label::ShoppingCart));
    for line in &view.lines {
        let _ = writeln!(
            out,
            "{:>5}  {} × {:<4} {:>12}",
            line.product.id,
            line.product.name,
            line.quantity,
            config.format_currency(line.line_total())
        );
    }
    let _ = writeln!(
        out,
        "{} {}",
        session.locale().text(Label::Total),
        config.format_currency(view.totals.total)
    );
    out
}

fn format_history(session: &Session, transactions: &[Transaction]) -> String {
    let config = session.config();
    let mut out = String::new();
    for tx in transactions {
        let _ = writeln!(
            out,
            "{:>5}  {}  {}  {:<20} {:>12}  {}",
            tx.id,
            tx.receipt_number,
            tx.date,
            tx.customer_name,
            config.format_currency(tx.total),
            session.locale().text(tx.status.label())
        );
    }
    out
}

fn format_resolution(resolution: &Resolution) -> String {
    match resolution {
        Resolution::Denied => "Cancelled".to_string(),
        Resolution::CartCleared => "Cart cleared".to_string(),
        Resolution::TransactionDeleted { message, .. }
        | Resolution::ProductDeleted { message, .. } => message.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("add 7").unwrap(), Some(Command::Add(7)));
        assert_eq!(parse_command("  INC 3 ").unwrap(), Some(Command::Inc(3)));
        assert_eq!(parse_command("cart").unwrap(), Some(Command::Cart));
        assert_eq!(parse_command("").unwrap(), None);
        assert_eq!(
            parse_command("yes").unwrap(),
            Some(Command::Answer(Consent::Grant))
        );
    }

    #[test]
    fn test_parse_add_product_keeps_spaces_in_name() {
        let command = parse_command("add-product 3.50 12 Mint Tea").unwrap();
        assert_eq!(
            command,
            Some(Command::AddProduct {
                name: "Mint Tea".to_string(),
                price: Money::from_cents(350),
                stock: 12,
            })
        );
    }

    #[test]
    fn test_parse_status_and_lang() {
        assert_eq!(
            parse_command("status Pending").unwrap(),
            Some(Command::Status(TransactionStatus::Pending))
        );
        assert_eq!(parse_command("lang he").unwrap(), Some(Command::Lang(Locale::He)));
        assert_eq!(
            parse_command("lang fr").unwrap_err().code,
            ErrorCode::ValidationError
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_command("add seven").unwrap_err().code,
            ErrorCode::ValidationError
        );
        assert_eq!(
            parse_command("deduct 4").unwrap_err().code,
            ErrorCode::ValidationError
        );
        assert!(parse_command("dance").is_err());
    }
}
