//! One-shot storage commands.
//!
//! Each command issues a single method call through the same
//! [`StoragePlugin`] that `serve` hosts, so results and errors match what a
//! channel caller would see.

use biostore_channel::{MethodResponse, StoragePlugin};
use serde_json::{json, Value};

/// Unwrap a response into its result value.
pub fn into_result(response: MethodResponse) -> anyhow::Result<Value> {
    match response {
        MethodResponse::Success { result } => Ok(result),
        MethodResponse::Error { code, message, .. } => anyhow::bail!("{}: {}", code, message),
        MethodResponse::NotImplemented => anyhow::bail!("Method not implemented"),
    }
}

/// Print the capability probe result.
pub async fn probe(plugin: &StoragePlugin) -> anyhow::Result<()> {
    let result = into_result(plugin.call("canAuthenticate", None).await)?;
    println!("{}", result.as_str().unwrap_or_default());
    Ok(())
}

/// Run the init guard.
pub async fn init(plugin: &StoragePlugin, authentication_required: bool) -> anyhow::Result<()> {
    let args = json!({"options": {"authenticationRequired": authentication_required}});
    into_result(plugin.call("init", Some(args)).await)?;
    println!("Initialized channel '{}'.", plugin.channel());
    Ok(())
}

/// Store a secret, prompting for it when no content is given.
pub async fn write(
    plugin: &StoragePlugin,
    name: &str,
    content: Option<String>,
) -> anyhow::Result<()> {
    let content = match content {
        Some(content) => content,
        None => {
            let prompt = format!("Enter secret for '{name}': ");
            rpassword::prompt_password(prompt)
                .map_err(|e| anyhow::anyhow!("Failed to read secret: {}", e))?
        }
    };

    let args = json!({"name": name, "content": content});
    into_result(plugin.call("write", Some(args)).await)?;
    println!("Secret '{}' stored.", name);
    Ok(())
}

/// Print a stored secret.
pub async fn read(plugin: &StoragePlugin, name: &str) -> anyhow::Result<()> {
    match into_result(plugin.call("read", Some(json!({"name": name}))).await)? {
        Value::String(secret) => {
            println!("{}", secret);
            Ok(())
        }
        _ => anyhow::bail!("No secret stored under '{}'", name),
    }
}

/// Delete a stored secret.
pub async fn delete(plugin: &StoragePlugin, name: &str) -> anyhow::Result<()> {
    let removed = into_result(plugin.call("delete", Some(json!({"name": name}))).await)?;
    if removed.as_bool().unwrap_or(false) {
        println!("Secret '{}' deleted.", name);
    } else {
        println!("No secret stored under '{}'.", name);
    }
    Ok(())
}
