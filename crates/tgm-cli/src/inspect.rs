//! # Inspect Subcommand
//!
//! Prints the introspection projection of a model as pretty JSON.
//!
//! ```bash
//! tgm inspect models/*.yaml                       # all types
//! tgm inspect models/*.yaml --type Shipment
//! tgm inspect models/*.yaml --relations Delivery
//! tgm inspect models/*.yaml --namespace logistics.shipments
//! tgm inspect models/*.yaml --kind ROOT_ENTITY
//! ```
//!
//! Queries naming something the model does not contain print `null`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Args};
use serde_json::Value;

use tgm_core::TypeKind;
use tgm_model::{Introspection, Model, ModelConfig};

/// Arguments for the inspect subcommand.
#[derive(Args, Debug, Default)]
#[command(group(ArgGroup::new("query").multiple(false)))]
pub struct InspectArgs {
    /// Declaration files (YAML or JSON), merged in the given order.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Print a single type by name.
    #[arg(long = "type", value_name = "NAME", group = "query")]
    pub type_name: Option<String>,

    /// Print every type of a kind (e.g. ROOT_ENTITY, ENUM).
    #[arg(long, value_name = "KIND", group = "query")]
    pub kind: Option<String>,

    /// Print the relations in which a type takes part.
    #[arg(long, value_name = "NAME", group = "query")]
    pub relations: Option<String>,

    /// Print the namespace tree.
    #[arg(long, group = "query")]
    pub namespaces: bool,

    /// Print one namespace by dotted path; an empty string is the root.
    #[arg(long, value_name = "PATH", group = "query")]
    pub namespace: Option<String>,

    /// Print an enum type with its values.
    #[arg(long = "enum", value_name = "NAME", group = "query")]
    pub enum_name: Option<String>,

    /// Print the projection even if validation reports errors.
    #[arg(long)]
    pub allow_invalid: bool,
}

/// Execute the inspect subcommand.
pub fn run_inspect(args: &InspectArgs) -> Result<u8> {
    let config = ModelConfig::load_all(&args.files).context("failed to load model declarations")?;
    let model = Model::new(config);

    let result = model.validate();
    if result.has_errors() {
        if !args.allow_invalid {
            bail!(
                "model is invalid ({} error(s)); run `tgm validate` for details or pass --allow-invalid",
                result.error_count()
            );
        }
        tracing::warn!(errors = result.error_count(), "inspecting an invalid model");
    }

    let value = inspect_json(args, &model)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(0)
}

/// Evaluate the query selected by `args` against `model`.
pub fn inspect_json(args: &InspectArgs, model: &Model) -> Result<Value> {
    let intro = Introspection::new(model);

    let value = if let Some(name) = &args.type_name {
        serde_json::to_value(intro.type_by_name(name))?
    } else if let Some(kind) = &args.kind {
        let kind: TypeKind = kind.parse()?;
        serde_json::to_value(intro.types_of_kind(kind))?
    } else if let Some(name) = &args.relations {
        serde_json::to_value(intro.relations(name))?
    } else if args.namespaces {
        serde_json::to_value(intro.namespaces())?
    } else if let Some(path) = &args.namespace {
        serde_json::to_value(intro.namespace(&split_path(path)))?
    } else if let Some(name) = &args.enum_name {
        serde_json::to_value(intro.enum_type(name))?
    } else {
        serde_json::to_value(intro.types())?
    };
    Ok(value)
}

/// `"a.b"` → `["a", "b"]`; `""` → the root path.
fn split_path(dotted: &str) -> Vec<&str> {
    if dotted.is_empty() {
        Vec::new()
    } else {
        dotted.split('.').collect()
    }
}
