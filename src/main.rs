//! tripsplit-engine CLI
//!
//! Compute balances and settlements for a group file from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Show who owes whom
//! tripsplit-engine settle --input group.json
//!
//! # Balances only, in a specific currency, as JSON
//! tripsplit-engine balances --input group.json --currency USD --format json
//!
//! # One-off conversion
//! tripsplit-engine convert --amount 100 --from EUR --to KRW
//!
//! # Turn a receipt-scan result into a transaction record
//! tripsplit-engine receipt --input scan.json --member u1
//!
//! # Generate a random group for testing
//! tripsplit-engine generate --members 5 --transactions 20
//! ```

use rust_decimal::Decimal;
use std::fs;
use std::process;
use tripsplit_engine::core::currency::{Currency, RateTable};
use tripsplit_engine::core::group::Group;
use tripsplit_engine::core::member::MemberId;
use tripsplit_engine::engine::settlement::{round2, SettlementReport};
use tripsplit_engine::scan::receipt::ReceiptScan;
use tripsplit_engine::simulation::group_gen::{generate_random_group, GroupConfig};

fn print_usage() {
    eprintln!(
        r#"tripsplit-engine — group travel-expense tracking and debt settlement

USAGE:
    tripsplit-engine <COMMAND> [OPTIONS]

COMMANDS:
    settle      Compute balances and the settlement plan for a group
    balances    Compute per-member balances only
    convert     Convert an amount between supported currencies
    currencies  List supported currencies
    receipt     Convert a receipt-scan result into a transaction record
    generate    Generate a random group (for testing)
    help        Show this message

OPTIONS (settle, balances):
    --input <FILE>      Path to a group JSON file
    --currency <CODE>   Display currency (default: the group's default)
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (convert):
    --amount <N>        Amount to convert
    --from <CODE>       Source currency
    --to <CODE>         Target currency

OPTIONS (receipt):
    --input <FILE>      Path to the scan-result JSON file
    --member <ID>       Member who paid the receipt

OPTIONS (generate):
    --members <N>       Number of members (default: 5)
    --transactions <N>  Number of transactions (default: 20)
    --currencies <LIST> Comma-separated currency codes (default: EUR)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    tripsplit-engine settle --input group.json
    tripsplit-engine balances --input group.json --currency USD --format json
    tripsplit-engine convert --amount 100 --from EUR --to KRW
    tripsplit-engine generate --members 4 --currencies EUR,KRW --output test.json"#
    );
}

fn load_group(path: &str) -> Group {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing group JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "id": "seoulTrip_1700000000000",
  "name": "Seoul Trip",
  "defaultCurrency": "EUR",
  "members": [{{ "id": "u1", "name": "Alice" }}],
  "transactions": [
    {{ "id": 1700000000001, "amount": "42.80", "currency": "EUR",
       "message": "Dinner", "memberId": "u1",
       "datetime": "2024-10-03T19:45:00Z" }}
  ]
}}"#
        );
        process::exit(1);
    })
}

fn parse_currency(code: &str) -> Currency {
    code.parse().unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    })
}

/// Output format for report commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Options shared by `settle` and `balances`.
struct ReportArgs {
    input: String,
    currency: Option<Currency>,
    format: OutputFormat,
}

fn parse_report_args(args: &[String]) -> ReportArgs {
    let mut input = None;
    let mut currency = None;
    let mut format = OutputFormat::Text;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--currency" => {
                i += 1;
                let code = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--currency requires a currency code");
                    process::exit(1);
                });
                currency = Some(parse_currency(&code));
            }
            "--format" => {
                i += 1;
                let value = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
                format = OutputFormat::parse(&value).unwrap_or_else(|| {
                    eprintln!("Unknown format '{}': expected 'text' or 'json'", value);
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    ReportArgs {
        input: input.unwrap_or_else(|| {
            eprintln!("Error: --input <FILE> is required");
            process::exit(1);
        }),
        currency,
        format,
    }
}

fn compute_report(args: &ReportArgs) -> (Group, SettlementReport) {
    let group = load_group(&args.input);
    let display = args.currency.unwrap_or(group.default_currency);
    let rates = RateTable::default();

    let report = SettlementReport::compute(&group.members, &group.transactions, display, &rates)
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        });
    (group, report)
}

fn cmd_settle(args: &[String]) {
    let args = parse_report_args(args);
    let (group, report) = compute_report(&args);

    if args.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report).unwrap());
    } else {
        println!("Group: {}\n", group.name);
        println!("{}", report);
    }
}

fn cmd_balances(args: &[String]) {
    let args = parse_report_args(args);
    let (group, report) = compute_report(&args);

    if args.format == OutputFormat::Json {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct BalancesOutput {
            display_currency: Currency,
            total_spent: Decimal,
            balances: Vec<(String, Decimal)>,
        }
        let output = BalancesOutput {
            display_currency: report.display_currency,
            total_spent: round2(report.total_spent),
            balances: report
                .balances
                .iter()
                .map(|(name, b)| (name.clone(), round2(*b)))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        println!("Group: {}", group.name);
        println!(
            "Total Spent: {} {}\n",
            report.display_currency,
            round2(report.total_spent)
        );
        for (name, balance) in &report.balances {
            println!("  {}: {} {}", name, report.display_currency, round2(*balance));
        }
    }
}

fn cmd_convert(args: &[String]) {
    let mut amount = None;
    let mut from = None;
    let mut to = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--amount" => {
                i += 1;
                let raw = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--amount requires a number");
                    process::exit(1);
                });
                amount = Some(raw.parse::<Decimal>().unwrap_or_else(|e| {
                    eprintln!("Invalid amount '{}': {}", raw, e);
                    process::exit(1);
                }));
            }
            "--from" => {
                i += 1;
                from = args.get(i).map(|c| parse_currency(c));
            }
            "--to" => {
                i += 1;
                to = args.get(i).map(|c| parse_currency(c));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let (Some(amount), Some(from), Some(to)) = (amount, from, to) else {
        eprintln!("Error: --amount, --from and --to are all required");
        process::exit(1);
    };

    let rates = RateTable::default();
    match rates.convert(amount, from, to) {
        Ok(converted) => println!("{} {} = {} {}", amount, from, round2(converted), to),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn cmd_currencies() {
    for currency in RateTable::default().supported_currencies() {
        println!("{}", currency);
    }
}

fn cmd_receipt(args: &[String]) {
    let mut input = None;
    let mut member = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input = args.get(i).cloned();
            }
            "--member" => {
                i += 1;
                member = args.get(i).cloned();
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let (Some(input), Some(member)) = (input, member) else {
        eprintln!("Error: --input <FILE> and --member <ID> are required");
        process::exit(1);
    };

    let content = fs::read_to_string(&input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", input, e);
        process::exit(1);
    });
    let scan: ReceiptScan = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing scan JSON: {}", e);
        process::exit(1);
    });

    match scan.into_transaction(MemberId::new(member)) {
        Ok(tx) => println!("{}", serde_json::to_string_pretty(&tx).unwrap()),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn cmd_generate(args: &[String]) {
    let mut members = 5usize;
    let mut transactions = 20usize;
    let mut currencies_str = "EUR".to_string();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--members" => {
                i += 1;
                members = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--members requires a number");
                    process::exit(1);
                });
            }
            "--transactions" => {
                i += 1;
                transactions = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--transactions requires a number");
                    process::exit(1);
                });
            }
            "--currencies" => {
                i += 1;
                currencies_str = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--currencies requires a comma-separated list");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = args.get(i).cloned();
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let currencies: Vec<Currency> = currencies_str
        .split(',')
        .map(|s| parse_currency(s.trim()))
        .collect();

    let config = GroupConfig {
        member_count: members,
        transaction_count: transactions,
        currencies,
        ..Default::default()
    };
    let group = generate_random_group(&config);
    let json = serde_json::to_string_pretty(&group).unwrap();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} transactions across {} members → {}",
            group.transactions.len(),
            members,
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "settle" => cmd_settle(rest),
        "balances" => cmd_balances(rest),
        "convert" => cmd_convert(rest),
        "currencies" => cmd_currencies(),
        "receipt" => cmd_receipt(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
