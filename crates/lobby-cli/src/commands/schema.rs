use lobby_core::entities::{AdminSession, Comment, Update, WaitlistEntry};
use lobby_core::inputs::{NewComment, NewUpdate};
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaType};
use crate::output::output;

/// Handle `lobby schema <type>`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema_value(args.type_name)?, flags.format)
}

fn schema_value(kind: SchemaType) -> anyhow::Result<serde_json::Value> {
    let schema = match kind {
        SchemaType::WaitlistEntry => schema_for!(WaitlistEntry),
        SchemaType::Update => schema_for!(Update),
        SchemaType::Comment => schema_for!(Comment),
        SchemaType::AdminSession => schema_for!(AdminSession),
        SchemaType::NewUpdate => schema_for!(NewUpdate),
        SchemaType::NewComment => schema_for!(NewComment),
    };
    Ok(serde_json::to_value(schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_schema_lists_comments() {
        let schema = schema_value(SchemaType::Update).unwrap();
        assert_eq!(schema["title"], "Update");
        assert!(schema["properties"]["comments"].is_object());
    }

    #[test]
    fn every_type_exports() {
        for kind in [
            SchemaType::WaitlistEntry,
            SchemaType::Update,
            SchemaType::Comment,
            SchemaType::AdminSession,
            SchemaType::NewUpdate,
            SchemaType::NewComment,
        ] {
            assert!(schema_value(kind).unwrap().is_object());
        }
    }
}
