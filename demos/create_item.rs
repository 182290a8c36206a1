use std::{env, fs};

use ews_builder::{BuildOptions, Builder, Element, FolderId, ItemKind, Value};
use serde::Deserialize;

#[derive(Deserialize)]
struct Request {
    /// The kind of item to create, e.g. "message" or "calendar".
    kind: String,

    /// The folder to save the items in, e.g. ":calendar" or an opaque id.
    saved_item_folder_id: Option<toml::Value>,

    #[serde(default)]
    options: BuildOptions,

    items: Vec<toml::Value>,
}

fn main() {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/calendar_item.toml".to_string());
    let request = fs::read_to_string(&path).expect("Unable to read request file");
    let request: Request = toml::from_str(&request).expect("Unable to parse request file");

    let kind: ItemKind = request.kind.parse().expect("Unknown item kind");
    let builder = Builder::new(request.options);

    // Build the body of a `CreateItem` operation.
    let mut create_item = Element::new("m:CreateItem");
    if let Some(folder) = request.saved_item_folder_id {
        let folder = FolderId::try_from(&Value::from(folder)).expect("Invalid folder id");
        builder.saved_item_folder_id(&mut create_item, &folder);
    }

    let items = Value::from(toml::Value::Array(request.items));
    builder.items(&mut create_item, &items, kind);

    match create_item.to_xml_string() {
        Ok(xml) => println!("{xml}"),
        Err(err) => eprintln!("Failed to write request: {err}"),
    }
}
