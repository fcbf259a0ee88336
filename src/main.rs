use clap::{Parser, Subcommand};
use sheetgraph::cli;
use sheetgraph::config::{self, ImportConfig, TxnScope, WriteErrorPolicy};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheetgraph")]
#[command(about = "Import spreadsheet rows into a Neo4j property graph")]
#[command(long_about = "Sheetgraph - spreadsheet to Neo4j importer

Each non-numeric cell becomes a node labeled by its column header; each
numeric cell becomes a property on the relationships linking that row's
nodes. A row with k categorical columns produces k*(k-1) directed
relationships, so wide sheets fan out quadratically - by design.

COMMANDS:
  import   - Read a workbook and write nodes/relationships to Neo4j
  preview  - Classify a workbook without touching any database

EXAMPLES:
  sheetgraph preview sales.xlsx
  sheetgraph import sales.xlsx --uri bolt://localhost:7687 --user neo4j
  sheetgraph import sales.xlsx --row-transactions --skip-write-errors

Credentials can also come from NEO4J_URI, NEO4J_USER and NEO4J_PASSWORD.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Read a workbook and write nodes/relationships to Neo4j.

Row 1 of the sheet's used range supplies the column headers. For every
data row, categorical cells are MERGEd as (:HEADER:Import {value}) nodes
and every ordered pair of them is linked by a CREATEd relationship
carrying the row's numeric values as properties.

WRITE SEMANTICS:
  Nodes are merged on (label, import tag, value) - re-running an import
  never duplicates nodes. Relationships are created, not merged -
  re-running duplicates edges.

FAILURE HANDLING:
  By default each write is its own auto-commit transaction and the first
  failure aborts the run, possibly leaving the failing row half-written.
  --row-transactions wraps each row in one transaction with rollback;
  --skip-write-errors logs failed rows and keeps going.

EXAMPLES:
  sheetgraph import sales.xlsx
  sheetgraph import sales.xlsx --sheet 1 --uri bolt://graph:7687
  sheetgraph import sales.xlsx --row-transactions --skip-write-errors")]
    /// Read a workbook and write nodes/relationships to Neo4j
    Import {
        /// Path to the workbook (.xlsx)
        file: PathBuf,

        /// Zero-based worksheet index
        #[arg(short, long, default_value_t = 0)]
        sheet: usize,

        /// Bolt endpoint of the destination database
        #[arg(long, env = "NEO4J_URI", default_value = config::DEFAULT_DB_URL)]
        uri: String,

        /// Database user
        #[arg(long, env = "NEO4J_USER", default_value = config::DEFAULT_DB_USER)]
        user: String,

        /// Database password
        #[arg(long, env = "NEO4J_PASSWORD", default_value = config::DEFAULT_DB_PASSWORD, hide_default_value = true)]
        password: String,

        /// Consecutive blank cells/rows tolerated before a scan stops
        #[arg(long, default_value_t = config::DEFAULT_BLANK_RUN_THRESHOLD)]
        blank_run_threshold: usize,

        /// First data row, 1-based (row 1 holds the headers)
        #[arg(long, default_value_t = config::DEFAULT_DATA_START_ROW)]
        data_start_row: usize,

        /// Extra label applied to every imported node
        #[arg(long, default_value = config::DEFAULT_IMPORT_TAG)]
        import_tag: String,

        /// Wrap each row's writes in one transaction (rollback on failure)
        /// instead of one auto-commit transaction per write
        #[arg(long)]
        row_transactions: bool,

        /// Log failed rows and keep going instead of aborting the run
        #[arg(long)]
        skip_write_errors: bool,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,

        /// Show headers and extra detail
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Classify a workbook without touching any database.

Runs the same header extraction and row scan as 'import' and shows what
would be written: per row, the categorical cells that become nodes and
the numeric cells that become relationship properties.

EXAMPLES:
  sheetgraph preview sales.xlsx
  sheetgraph preview sales.xlsx --verbose   # every node and property
  sheetgraph preview sales.xlsx --json      # machine-readable")]
    /// Classify a workbook without touching any database
    Preview {
        /// Path to the workbook (.xlsx)
        file: PathBuf,

        /// Zero-based worksheet index
        #[arg(short, long, default_value_t = 0)]
        sheet: usize,

        /// Consecutive blank cells/rows tolerated before a scan stops
        #[arg(long, default_value_t = config::DEFAULT_BLANK_RUN_THRESHOLD)]
        blank_run_threshold: usize,

        /// First data row, 1-based (row 1 holds the headers)
        #[arg(long, default_value_t = config::DEFAULT_DATA_START_ROW)]
        data_start_row: usize,

        /// Print the preview as JSON
        #[arg(long)]
        json: bool,

        /// Show every node and property, not just per-row counts
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sheetgraph=info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import {
            file,
            sheet,
            uri,
            user,
            password,
            blank_run_threshold,
            data_start_row,
            import_tag,
            row_transactions,
            skip_write_errors,
            json,
            verbose,
        } => {
            let mut config = ImportConfig::new(file);
            config.sheet_index = sheet;
            config.db_url = uri;
            config.db_user = user;
            config.db_password = password;
            config.blank_run_threshold = blank_run_threshold;
            config.data_start_row = data_start_row;
            config.import_tag = import_tag;
            if row_transactions {
                config.txn_scope = TxnScope::PerRow;
            }
            if skip_write_errors {
                config.on_write_error = WriteErrorPolicy::Skip;
            }

            cli::import(config, json, verbose).await
        }

        Commands::Preview {
            file,
            sheet,
            blank_run_threshold,
            data_start_row,
            json,
            verbose,
        } => {
            let mut config = ImportConfig::new(file);
            config.sheet_index = sheet;
            config.blank_run_threshold = blank_run_threshold;
            config.data_start_row = data_start_row;

            cli::preview(config, json, verbose)
        }
    }
}
