use std::error::Error;

use clap::{Args, Parser, Subcommand, ValueEnum};
use engine::{Engine, NewExpenseCmd, ShareRequest};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "divvy_admin")]
#[command(about = "Admin utilities for Divvy (bootstrap persons/groups, inspect balances)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:./divvy.db?mode=rwc")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Person(Person),
    Group(Group),
    Expense(Expense),
    /// Print balances of a group, or of a person across their groups.
    Balances(BalancesArgs),
    /// Print the payments that settle a group.
    Settle(SettleArgs),
}

#[derive(Args, Debug)]
struct Person {
    #[command(subcommand)]
    command: PersonCommand,
}

#[derive(Subcommand, Debug)]
enum PersonCommand {
    Create(PersonCreateArgs),
    List,
}

#[derive(Args, Debug)]
struct PersonCreateArgs {
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
struct Group {
    #[command(subcommand)]
    command: GroupCommand,
}

#[derive(Subcommand, Debug)]
enum GroupCommand {
    Create(GroupCreateArgs),
    List,
}

#[derive(Args, Debug)]
struct GroupCreateArgs {
    #[arg(long)]
    name: String,
    /// Member name; repeat in the order members should be listed.
    #[arg(long = "member", required = true)]
    members: Vec<String>,
}

#[derive(Args, Debug)]
struct Expense {
    #[command(subcommand)]
    command: ExpenseCommand,
}

#[derive(Subcommand, Debug)]
enum ExpenseCommand {
    Add(ExpenseAddArgs),
    List(GroupRef),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SplitType {
    Equal,
    Percentage,
}

#[derive(Args, Debug)]
struct ExpenseAddArgs {
    #[arg(long)]
    group: Uuid,
    #[arg(long)]
    description: String,
    #[arg(long)]
    amount: f64,
    /// Name of the member who paid.
    #[arg(long)]
    payer: String,
    #[arg(long, value_enum, default_value = "equal")]
    split_type: SplitType,
    /// `NAME:AMOUNT:PERCENT`, repeatable. Only used with `--split-type percentage`.
    #[arg(long = "share")]
    shares: Vec<String>,
}

#[derive(Args, Debug)]
struct GroupRef {
    #[arg(long)]
    group: Uuid,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct BalancesArgs {
    #[arg(long)]
    group: Option<Uuid>,
    /// Person name.
    #[arg(long)]
    person: Option<String>,
}

#[derive(Args, Debug)]
struct SettleArgs {
    #[arg(long)]
    group: Uuid,
}

/// Splits a `NAME:AMOUNT:PERCENT` share into its parts.
fn parse_share(raw: &str) -> Result<(String, f64, f64), String> {
    let mut parts = raw.rsplitn(3, ':');
    let (Some(percent), Some(amount), Some(name)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("invalid share `{raw}`, expected NAME:AMOUNT:PERCENT"));
    };
    let amount = amount
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid share amount in `{raw}`"))?;
    let percent = percent
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid share percentage in `{raw}`"))?;
    Ok((name.trim().to_string(), amount, percent))
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::Person(Person {
            command: PersonCommand::Create(args),
        }) => {
            let person = engine.create_person(&args.name).await?;
            println!("created person: {} ({})", person.name, person.id);
        }
        Command::Person(Person {
            command: PersonCommand::List,
        }) => {
            for person in engine.persons().await? {
                println!("{}\t{}", person.id, person.name);
            }
        }
        Command::Group(Group {
            command: GroupCommand::Create(args),
        }) => {
            let mut member_ids = Vec::with_capacity(args.members.len());
            for name in &args.members {
                member_ids.push(engine.person_by_name(name).await?.id);
            }
            let group = engine.create_group(&args.name, &member_ids).await?;
            println!("created group: {} ({})", group.name, group.id);
        }
        Command::Group(Group {
            command: GroupCommand::List,
        }) => {
            for summary in engine.groups().await? {
                let members: Vec<&str> = summary
                    .group
                    .members
                    .iter()
                    .map(|m| m.name.as_str())
                    .collect();
                println!(
                    "{}\t{}\t{:.2}\t{}",
                    summary.group.id,
                    summary.group.name,
                    summary.total_expenses,
                    members.join(", ")
                );
            }
        }
        Command::Expense(Expense {
            command: ExpenseCommand::Add(args),
        }) => {
            let payer = engine.person_by_name(&args.payer).await?;
            let cmd = match args.split_type {
                SplitType::Equal => {
                    NewExpenseCmd::equal(args.group, args.description, args.amount, payer.id)
                }
                SplitType::Percentage => {
                    let mut shares = Vec::with_capacity(args.shares.len());
                    for raw in &args.shares {
                        let (name, amount, percent) = parse_share(raw)?;
                        let person = engine.person_by_name(&name).await?;
                        shares.push(ShareRequest::new(person.id, amount, Some(percent)));
                    }
                    NewExpenseCmd::percentage(
                        args.group,
                        args.description,
                        args.amount,
                        payer.id,
                        shares,
                    )
                }
            };
            let expense = engine.add_expense(cmd).await?;
            println!("recorded expense: {} ({})", expense.description, expense.id);
        }
        Command::Expense(Expense {
            command: ExpenseCommand::List(args),
        }) => {
            for expense in engine.group_expenses(args.group).await? {
                println!(
                    "{}\t{}\t{:.2}\t{}\t{}",
                    expense.created_at.format("%Y-%m-%d %H:%M"),
                    expense.description,
                    expense.amount,
                    expense.kind.as_str(),
                    expense.payer_id
                );
            }
        }
        Command::Balances(BalancesArgs {
            group: Some(group_id),
            ..
        }) => {
            let (group, balances) = engine.group_balances(group_id).await?;
            println!("{}", group.name);
            for b in balances {
                println!("  {:<20} {:>10.2}", b.person.name, b.balance);
            }
        }
        Command::Balances(BalancesArgs {
            person: Some(name), ..
        }) => {
            let person = engine.person_by_name(&name).await?;
            let (person, balances) = engine.person_balances(person.id).await?;
            println!("{}", person.name);
            for b in balances {
                println!("  {:<20} {:>10.2}", b.group_name, b.balance);
            }
        }
        Command::Balances(_) => {
            eprintln!("either --group or --person is required");
            std::process::exit(2);
        }
        Command::Settle(args) => {
            let (group, transactions) = engine.group_settlements(args.group).await?;
            if transactions.is_empty() {
                println!("{} is settled", group.name);
            }
            for t in transactions {
                println!("{} pays {} {:.2}", t.from.name, t.to.name, t.amount);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_parses_name_amount_percent() {
        assert_eq!(
            parse_share("Bob:25.5:50").unwrap(),
            ("Bob".to_string(), 25.5, 50.0)
        );
    }

    #[test]
    fn share_name_may_contain_colons() {
        let (name, amount, percent) = parse_share("Team: Ops:10:100").unwrap();
        assert_eq!(name, "Team: Ops");
        assert_eq!(amount, 10.0);
        assert_eq!(percent, 100.0);
    }

    #[test]
    fn share_rejects_missing_parts() {
        assert!(parse_share("Bob:25").is_err());
        assert!(parse_share("Bob:x:50").is_err());
    }

    #[test]
    fn cli_requires_a_balance_scope() {
        assert!(Cli::try_parse_from(["divvy_admin", "balances"]).is_err());
        assert!(
            Cli::try_parse_from([
                "divvy_admin",
                "balances",
                "--person",
                "Ann",
                "--group",
                "00000000-0000-4000-8000-000000000000",
            ])
            .is_err()
        );
    }
}
