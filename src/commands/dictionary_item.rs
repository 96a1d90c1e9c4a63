//! # Dictionary Item Command Handler
//!
//! This module handles edge dictionary item commands including creation,
//! listing, describing, updating, and deletion. Dictionary items attach to
//! a dictionary rather than a service version, so there is no version or
//! autoclone handling here.

use std::io::Write;

use getopts::Options;

use crate::commands::Globals;
use crate::commands::shared::{self, dispatch_command};
use crate::dictionary::{self, DictionaryItem, DictionaryItemInput};
use crate::errors::Error;
use crate::text;

const DICTIONARY_ITEM_USAGE: &str =
    "Usage: merictl dictionaryitem <create|list|describe|update|delete> [flags...]";

/// Handles all dictionary item commands.
pub async fn handle_dictionaryitem_command(
    args: &[String],
    globals: &mut Globals<'_>,
) -> Result<(), Error> {
    dispatch_command!("dictionaryitem", DICTIONARY_ITEM_USAGE, args, globals, {
        "create" => handle_item_create,
        "list" => handle_item_list,
        "describe" => handle_item_describe,
        "get" => handle_item_describe,
        "update" => handle_item_update,
        "delete" => handle_item_delete,
    })
}

fn item_opts(opts: &mut Options) {
    opts.optopt("", "dictionary-id", "Dictionary ID", "ID");
    opts.optopt("", "key", "Dictionary item key", "KEY");
    opts.optopt("", "value", "Dictionary item value", "VALUE");
}

/// Handles dictionary item creation.
async fn handle_item_create(args: &[String], globals: &mut Globals<'_>) -> Result<(), Error> {
    let mut opts = Options::new();
    shared::service_opts(&mut opts);
    item_opts(&mut opts);
    let matches = shared::parse(&opts, args, DICTIONARY_ITEM_USAGE)?;

    let dictionary_id = shared::required_flag(&matches, "dictionary-id")?;
    let key = shared::required_flag(&matches, "key")?;
    let value = shared::required_flag(&matches, "value")?;
    let service_id = shared::resolve_service(globals, &matches)?;

    let input = DictionaryItemInput {
        service_id,
        dictionary_id,
        item_key: key,
        item_value: value,
    };
    let item = dictionary::create(&globals.client, &input).await?;
    text::success(
        globals.out,
        &format!(
            "Created dictionary item {} (service {} dictionary {})",
            item.item_key, item.service_id, item.dictionary_id
        ),
    );
    Ok(())
}

/// Handles dictionary item listing.
async fn handle_item_list(args: &[String], globals: &mut Globals<'_>) -> Result<(), Error> {
    let mut opts = Options::new();
    shared::service_opts(&mut opts);
    item_opts(&mut opts);
    let matches = shared::parse(&opts, args, DICTIONARY_ITEM_USAGE)?;

    let dictionary_id = shared::required_flag(&matches, "dictionary-id")?;
    let service_id = shared::resolve_service(globals, &matches)?;

    let items = dictionary::list(&globals.client, &service_id, &dictionary_id).await?;
    text::field(globals.out, "", "Service ID", &service_id);
    text::field(globals.out, "", "Dictionary ID", &dictionary_id);
    let total = items.len();
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(globals.out, "Item: {}/{}", i + 1, total);
        write_item(globals.out, "\t", item);
    }
    Ok(())
}

/// Handles describing a single dictionary item.
async fn handle_item_describe(args: &[String], globals: &mut Globals<'_>) -> Result<(), Error> {
    let mut opts = Options::new();
    shared::service_opts(&mut opts);
    item_opts(&mut opts);
    let matches = shared::parse(&opts, args, DICTIONARY_ITEM_USAGE)?;

    let dictionary_id = shared::required_flag(&matches, "dictionary-id")?;
    let key = shared::required_flag(&matches, "key")?;
    let service_id = shared::resolve_service(globals, &matches)?;

    let item = dictionary::get(&globals.client, &service_id, &dictionary_id, &key).await?;
    text::field(globals.out, "", "Service ID", &item.service_id);
    text::field(globals.out, "", "Dictionary ID", &item.dictionary_id);
    write_item(globals.out, "", &item);
    Ok(())
}

/// Handles updating (or inserting) a dictionary item.
async fn handle_item_update(args: &[String], globals: &mut Globals<'_>) -> Result<(), Error> {
    let mut opts = Options::new();
    shared::service_opts(&mut opts);
    item_opts(&mut opts);
    let matches = shared::parse(&opts, args, DICTIONARY_ITEM_USAGE)?;

    let dictionary_id = shared::required_flag(&matches, "dictionary-id")?;
    let key = shared::required_flag(&matches, "key")?;
    let value = shared::required_flag(&matches, "value")?;
    let service_id = shared::resolve_service(globals, &matches)?;

    let input = DictionaryItemInput {
        service_id,
        dictionary_id,
        item_key: key,
        item_value: value,
    };
    let item = dictionary::update(&globals.client, &input).await?;
    text::success(
        globals.out,
        &format!(
            "Updated dictionary item {} (service {} dictionary {})",
            item.item_key, item.service_id, item.dictionary_id
        ),
    );
    text::line_break(globals.out);
    text::field(globals.out, "", "Service ID", &item.service_id);
    text::field(globals.out, "", "Dictionary ID", &item.dictionary_id);
    write_item(globals.out, "", &item);
    Ok(())
}

/// Handles dictionary item deletion.
async fn handle_item_delete(args: &[String], globals: &mut Globals<'_>) -> Result<(), Error> {
    let mut opts = Options::new();
    shared::service_opts(&mut opts);
    item_opts(&mut opts);
    let matches = shared::parse(&opts, args, DICTIONARY_ITEM_USAGE)?;

    let dictionary_id = shared::required_flag(&matches, "dictionary-id")?;
    let key = shared::required_flag(&matches, "key")?;
    let service_id = shared::resolve_service(globals, &matches)?;

    dictionary::delete(&globals.client, &service_id, &dictionary_id, &key).await?;
    text::success(
        globals.out,
        &format!(
            "Deleted dictionary item {} (service {} dictionary {})",
            key, service_id, dictionary_id
        ),
    );
    Ok(())
}

fn write_item(out: &mut dyn Write, indent: &str, item: &DictionaryItem) {
    text::field(out, indent, "Item Key", &item.item_key);
    text::field(out, indent, "Item Value", &item.item_value);
}
