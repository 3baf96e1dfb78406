//! Subcommands of the console.
//!
//! Every command returns the JSON document to print, or `None` when the
//! backend call has no result worth printing.

use crate::config::Config;
use crate::errors::CliError;
use af_client::{AfClient, Service, Subscription, Userplane, created_service_id};
use clap::{Args, Subcommand};
use pfd::{
    AppUi, AppWire, Document, DuplicateKeyPolicy, FieldAssignment, PfdTransactionUi,
    PfdTransactionWire, SchemaTransformer,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::io::Read;
use std::path::{Path, PathBuf};

type Output = Result<Option<JsonValue>, CliError>;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert PFD documents between wire and UI form offline
    #[command(subcommand)]
    Convert(ConvertCommand),
    /// PFD management transactions (AF API)
    #[command(subcommand)]
    Pfd(PfdCommand),
    /// AF services (5G OAM API)
    #[command(subcommand)]
    Services(ServiceCommand),
    /// Traffic influence subscriptions (AF API)
    #[command(subcommand)]
    Subscriptions(SubscriptionCommand),
    /// User-plane functions (CUPS API)
    #[command(subcommand)]
    Userplanes(UserplaneCommand),
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Read the document from FILE instead of stdin
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// The document is a single application instead of a transaction
    #[arg(long)]
    pub app: bool,
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Subcommand, Debug)]
pub enum ConvertCommand {
    /// Wire form to UI form
    ToUi(ConvertArgs),
    /// UI form to wire form
    ToWire {
        #[command(flatten)]
        args: ConvertArgs,
        /// Fail on duplicate application or PFD IDs
        #[arg(long)]
        strict: bool,
        /// Skip the form constraints
        #[arg(long)]
        no_validate: bool,
    },
}

/// Document to submit for a PFD create or update.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Read the document from FILE instead of stdin. On update, when only
    /// `--set` is given, the current document is fetched and edited.
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,
    /// Set the field at PATH to VALUE, e.g. `pfdDatas[0].apps.allowedDelay=5`
    #[arg(long = "set", value_name = "PATH=VALUE")]
    pub set: Vec<FieldAssignment>,
    /// The document is in UI form
    #[arg(long)]
    pub form: bool,
    /// Fail on duplicate application or PFD IDs in the UI form
    #[arg(long)]
    pub strict: bool,
}

#[derive(Subcommand, Debug)]
pub enum PfdCommand {
    List,
    Get {
        tid: String,
        /// Print the UI form
        #[arg(long)]
        form: bool,
    },
    Create(EditArgs),
    Update {
        tid: String,
        #[command(flatten)]
        edit: EditArgs,
    },
    Delete {
        tid: String,
    },
    /// Single applications of a transaction
    #[command(subcommand)]
    App(AppCommand),
}

#[derive(Subcommand, Debug)]
pub enum AppCommand {
    Get {
        tid: String,
        app_id: String,
        /// Print the UI form
        #[arg(long)]
        form: bool,
    },
    Update {
        tid: String,
        app_id: String,
        #[command(flatten)]
        edit: EditArgs,
    },
    Delete {
        tid: String,
        app_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ServiceCommand {
    List,
    Get { id: String },
    Create(InputArgs),
    Patch {
        id: String,
        #[command(flatten)]
        input: InputArgs,
    },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum SubscriptionCommand {
    List,
    Get { id: String },
    Create(InputArgs),
    /// Replace a subscription
    Update {
        id: String,
        #[command(flatten)]
        input: InputArgs,
    },
    Patch {
        id: String,
        #[command(flatten)]
        input: InputArgs,
    },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum UserplaneCommand {
    List,
    Get { id: String },
    Create(InputArgs),
    Patch {
        id: String,
        #[command(flatten)]
        input: InputArgs,
    },
    Delete { id: String },
}

pub async fn run(command: Command, config: &Config) -> Output {
    let policy = config.schema.on_duplicate_key;

    match command {
        Command::Convert(command) => convert(command, policy),
        Command::Pfd(command) => run_pfd(command, &client(config)?, policy).await,
        Command::Services(command) => run_services(command, &client(config)?).await,
        Command::Subscriptions(command) => run_subscriptions(command, &client(config)?).await,
        Command::Userplanes(command) => run_userplanes(command, &client(config)?).await,
    }
}

fn client(config: &Config) -> Result<AfClient, CliError> {
    Ok(AfClient::new(config.api()?.clone())?)
}

fn transformer(policy: DuplicateKeyPolicy, strict: bool) -> SchemaTransformer {
    if strict {
        SchemaTransformer::new(DuplicateKeyPolicy::Reject)
    } else {
        SchemaTransformer::new(policy)
    }
}

fn convert(command: ConvertCommand, policy: DuplicateKeyPolicy) -> Output {
    match command {
        ConvertCommand::ToUi(args) => {
            let input = read_input(args.input.input.as_deref())?;
            to_ui(args.app, &input).map(Some)
        }
        ConvertCommand::ToWire {
            args,
            strict,
            no_validate,
        } => {
            let input = read_input(args.input.input.as_deref())?;
            to_wire(args.app, &input, &transformer(policy, strict), !no_validate).map(Some)
        }
    }
}

fn to_ui(app: bool, input: &[u8]) -> Result<JsonValue, CliError> {
    let ui = if app {
        pfd::to_ui_app(&AppWire::from_slice(input)?).to_value()?
    } else {
        pfd::to_ui_form(&PfdTransactionWire::from_slice(input)?).to_value()?
    };
    Ok(ui)
}

fn to_wire(
    app: bool,
    input: &[u8],
    transformer: &SchemaTransformer,
    validate: bool,
) -> Result<JsonValue, CliError> {
    let wire = if app {
        let form = AppUi::from_slice(input)?;
        if validate {
            form.validate()?;
        }
        transformer.to_wire_app(&form)?.to_value()?
    } else {
        let form = PfdTransactionUi::from_slice(input)?;
        if validate {
            form.validate()?;
        }
        transformer.to_wire_form(&form)?.to_value()?
    };
    Ok(wire)
}

async fn run_pfd(command: PfdCommand, client: &AfClient, policy: DuplicateKeyPolicy) -> Output {
    match command {
        PfdCommand::List => output(&client.list_transactions().await?),
        PfdCommand::Get { tid, form: true } => output(&client.fetch_transaction_form(&tid).await?),
        PfdCommand::Get { tid, form: false } => output(&client.get_transaction(&tid).await?),
        PfdCommand::Create(edit) => {
            let created = if edit.form {
                let form: PfdTransactionUi = edit.read()?;
                client
                    .submit_transaction_form(&transformer(policy, edit.strict), None, &form)
                    .await?
            } else {
                let wire: PfdTransactionWire = edit.read()?;
                Some(client.create_transaction(&wire).await?)
            };
            output(&created)
        }
        PfdCommand::Update { tid, edit } => {
            if edit.form {
                let form = edit.read_or_fetch(client.fetch_transaction_form(&tid)).await?;
                client
                    .submit_transaction_form(&transformer(policy, edit.strict), Some(&tid), &form)
                    .await?;
            } else {
                let wire = edit.read_or_fetch(client.get_transaction(&tid)).await?;
                client.update_transaction(&tid, &wire).await?;
            }
            tracing::info!(tid = %tid, "Updated PFD transaction");
            Ok(None)
        }
        PfdCommand::Delete { tid } => {
            client.delete_transaction(&tid).await?;
            tracing::info!(tid = %tid, "Deleted PFD transaction");
            Ok(None)
        }
        PfdCommand::App(command) => run_pfd_app(command, client, policy).await,
    }
}

async fn run_pfd_app(command: AppCommand, client: &AfClient, policy: DuplicateKeyPolicy) -> Output {
    match command {
        AppCommand::Get {
            tid,
            app_id,
            form: true,
        } => output(&client.fetch_application_form(&tid, &app_id).await?),
        AppCommand::Get {
            tid,
            app_id,
            form: false,
        } => output(&client.get_application(&tid, &app_id).await?),
        AppCommand::Update { tid, app_id, edit } => {
            if edit.form {
                let form = edit
                    .read_or_fetch(client.fetch_application_form(&tid, &app_id))
                    .await?;
                client
                    .submit_application_form(&transformer(policy, edit.strict), &tid, &app_id, &form)
                    .await?;
            } else {
                let wire = edit
                    .read_or_fetch(client.get_application(&tid, &app_id))
                    .await?;
                client.update_application(&tid, &app_id, &wire).await?;
            }
            tracing::info!(tid = %tid, app_id = %app_id, "Updated PFD application");
            Ok(None)
        }
        AppCommand::Delete { tid, app_id } => {
            client.delete_application(&tid, &app_id).await?;
            tracing::info!(tid = %tid, app_id = %app_id, "Deleted PFD application");
            Ok(None)
        }
    }
}

async fn run_services(command: ServiceCommand, client: &AfClient) -> Output {
    match command {
        ServiceCommand::List => output(&client.list_services().await?),
        ServiceCommand::Get { id } => output(&client.get_service(&id).await?),
        ServiceCommand::Create(input) => {
            let service: Service = input.read("service")?;
            let created = client.create_service(&service).await?;
            if let Some(id) = created_service_id(&created) {
                tracing::info!(id, "Registered service");
            }
            output(&created)
        }
        ServiceCommand::Patch { id, input } => {
            let service: Service = input.read("service")?;
            client.patch_service(&id, &service).await?;
            tracing::info!(id = %id, "Patched service");
            Ok(None)
        }
        ServiceCommand::Delete { id } => {
            client.delete_service(&id).await?;
            tracing::info!(id = %id, "Deleted service");
            Ok(None)
        }
    }
}

async fn run_subscriptions(command: SubscriptionCommand, client: &AfClient) -> Output {
    match command {
        SubscriptionCommand::List => output(&client.list_subscriptions().await?),
        SubscriptionCommand::Get { id } => output(&client.get_subscription(&id).await?),
        SubscriptionCommand::Create(input) => {
            let subscription: Subscription = input.read("subscription")?;
            output(&client.create_subscription(&subscription).await?)
        }
        SubscriptionCommand::Update { id, input } => {
            let subscription: Subscription = input.read("subscription")?;
            client.update_subscription(&id, &subscription).await?;
            tracing::info!(id = %id, "Updated subscription");
            Ok(None)
        }
        SubscriptionCommand::Patch { id, input } => {
            let subscription: Subscription = input.read("subscription")?;
            client.patch_subscription(&id, &subscription).await?;
            tracing::info!(id = %id, "Patched subscription");
            Ok(None)
        }
        SubscriptionCommand::Delete { id } => {
            client.delete_subscription(&id).await?;
            tracing::info!(id = %id, "Deleted subscription");
            Ok(None)
        }
    }
}

async fn run_userplanes(command: UserplaneCommand, client: &AfClient) -> Output {
    match command {
        UserplaneCommand::List => output(&client.list_userplanes().await?),
        UserplaneCommand::Get { id } => output(&client.get_userplane(&id).await?),
        UserplaneCommand::Create(input) => {
            let userplane: Userplane = input.read("userplane")?;
            output(&client.create_userplane(&userplane).await?)
        }
        UserplaneCommand::Patch { id, input } => {
            let userplane: Userplane = input.read("userplane")?;
            client.patch_userplane(&id, &userplane).await?;
            tracing::info!(id = %id, "Patched userplane");
            Ok(None)
        }
        UserplaneCommand::Delete { id } => {
            client.delete_userplane(&id).await?;
            tracing::info!(id = %id, "Deleted userplane");
            Ok(None)
        }
    }
}

fn output<T: Serialize>(value: &T) -> Output {
    Ok(Some(serde_json::to_value(value)?))
}

/// Reads `path`, or stdin when no path is given.
fn read_input(path: Option<&Path>) -> Result<Vec<u8>, CliError> {
    match path {
        Some(path) => Ok(std::fs::read(path)?),
        None => {
            let mut buf = Vec::new();
            std::io::stdin().lock().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

impl InputArgs {
    fn read<T: DeserializeOwned>(&self, what: &'static str) -> Result<T, CliError> {
        let input = read_input(self.input.as_deref())?;
        serde_json::from_slice(&input).map_err(|e| CliError::InvalidInput {
            what,
            reason: e.to_string(),
        })
    }
}

impl EditArgs {
    fn read<T: Document>(&self) -> Result<T, CliError> {
        let input = read_input(self.input.as_deref())?;
        Ok(pfd::with_fields(&T::from_slice(&input)?, &self.set)?)
    }

    /// Like [`EditArgs::read`], but edits the `current` document when only
    /// `--set` is given.
    async fn read_or_fetch<T, F>(&self, current: F) -> Result<T, CliError>
    where
        T: Document,
        F: Future<Output = af_client::Result<T>>,
    {
        if self.input.is_none() && !self.set.is_empty() {
            let document = current.await?;
            return Ok(pfd::with_fields(&document, &self.set)?);
        }
        self.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pfd::{SchemaError, ValidationError};
    use serde_json::json;
    use std::io::Write;

    fn input_file(value: &JsonValue) -> tempfile::NamedTempFile {
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        write!(tmp, "{}", value).expect("write json");
        tmp
    }

    fn wire() -> JsonValue {
        json!({
            "afServiceId": "s1",
            "pfdDatas": {
                "app1": {
                    "externalAppID": "app1",
                    "allowedDelay": 5,
                    "pfds": {
                        "pfd1": {"pfdID": "pfd1", "flowDescriptions": ["a"], "urls": [], "domainNames": []}
                    }
                }
            }
        })
    }

    fn ui() -> JsonValue {
        json!({
            "afServiceId": "s1",
            "pfdDatas": [
                {"apps": {
                    "externalAppID": "app1",
                    "allowedDelay": 5,
                    "pfds": [{"pfd": {"pfdID": "pfd1", "flowDescriptions": ["a"], "urls": [], "domainNames": []}}]
                }}
            ]
        })
    }

    #[test]
    fn convert_both_directions() {
        let input = serde_json::to_vec(&wire()).unwrap();
        assert_eq!(to_ui(false, &input).unwrap(), ui());

        let input = serde_json::to_vec(&ui()).unwrap();
        let wire_form = to_wire(false, &input, &SchemaTransformer::default(), true).unwrap();
        assert_eq!(wire_form, wire());
    }

    #[test]
    fn convert_single_application() {
        let input = serde_json::to_vec(&wire()["pfdDatas"]["app1"]).unwrap();
        assert_eq!(to_ui(true, &input).unwrap(), ui()["pfdDatas"][0]["apps"]);
    }

    #[test]
    fn convert_validation_can_be_skipped() {
        let empty_app = serde_json::to_vec(&json!({"externalAppID": "app1", "pfds": []})).unwrap();

        let err = to_wire(true, &empty_app, &SchemaTransformer::default(), true).unwrap_err();
        assert!(matches!(err, CliError::Validation(ValidationError::NoPfds(_))));

        let wire_form = to_wire(true, &empty_app, &SchemaTransformer::default(), false).unwrap();
        assert_eq!(wire_form, json!({"externalAppID": "app1", "pfds": {}}));
    }

    #[test]
    fn strict_flag_overrides_config() {
        let input = serde_json::to_vec(&json!({
            "pfdDatas": [
                {"apps": {"externalAppID": "app1", "pfds": [{"pfd": {"pfdID": "p1"}}]}},
                {"apps": {"externalAppID": "app1", "pfds": [{"pfd": {"pfdID": "p2"}}]}}
            ]
        }))
        .unwrap();

        let lenient = transformer(DuplicateKeyPolicy::Overwrite, false);
        let wire_form = to_wire(false, &input, &lenient, true).unwrap();
        assert_eq!(wire_form["pfdDatas"]["app1"]["pfds"], json!({"p2": {"pfdID": "p2"}}));

        let strict = transformer(DuplicateKeyPolicy::Overwrite, true);
        let err = to_wire(false, &input, &strict, true).unwrap_err();
        assert!(matches!(err, CliError::Schema(SchemaError::DuplicateApplication(_))));

        let configured = transformer(DuplicateKeyPolicy::Reject, false);
        assert_eq!(configured.policy(), DuplicateKeyPolicy::Reject);
    }

    #[test]
    fn malformed_input() {
        let err = to_ui(false, br#"{"pfdDatas": []}"#).unwrap_err();
        assert!(matches!(err, CliError::Schema(SchemaError::MalformedTransaction(_))));
    }

    #[test]
    fn edit_args_apply_assignments() {
        let tmp = input_file(&ui());
        let edit = EditArgs {
            input: Some(tmp.path().to_path_buf()),
            set: vec!["pfdDatas[0].apps.allowedDelay=30".parse().unwrap()],
            form: true,
            strict: false,
        };

        let form: PfdTransactionUi = edit.read().unwrap();
        assert_eq!(form.pfd_datas[0].apps.extra_fields["allowedDelay"], 30);
    }

    #[tokio::test]
    async fn edit_args_fetch_only_when_setting_without_input() {
        let current = || async { Ok(AppWire::from_value(wire()["pfdDatas"]["app1"].clone()).unwrap()) };

        let edit = EditArgs {
            input: None,
            set: vec!["pfds.pfd1.urls=[\"u\"]".parse().unwrap()],
            form: false,
            strict: false,
        };
        let edited = edit.read_or_fetch(current()).await.unwrap();
        assert_eq!(edited.pfds["pfd1"].urls(), Some(&["u".to_string()][..]));

        let tmp = input_file(&json!({"externalAppID": "app2", "pfds": {}}));
        let edit = EditArgs {
            input: Some(tmp.path().to_path_buf()),
            set: vec!["allowedDelay=1".parse().unwrap()],
            form: false,
            strict: false,
        };
        let from_file = edit.read_or_fetch(current()).await.unwrap();
        assert_eq!(from_file.external_app_id, "app2");
        assert_eq!(from_file.allowed_delay(), Some(1));
    }

    #[test]
    fn input_args_report_resource() {
        let tmp = input_file(&json!(["not", "a", "service"]));
        let input = InputArgs {
            input: Some(tmp.path().to_path_buf()),
        };

        let err = input.read::<Service>("service").unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { what: "service", .. }));
    }

    #[tokio::test]
    async fn api_commands_require_api_section() {
        let command = Command::Services(ServiceCommand::List);
        let err = run(command, &Config::default()).await.unwrap_err();
        assert!(matches!(
            err,
            CliError::Config(crate::config::ConfigError::MissingSection("api"))
        ));
    }
}
