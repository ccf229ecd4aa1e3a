use anyhow::Context;
use ezstate::*;
use ezstate_core::Host;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Profile {
    name: String,
    last_name: String,
    age: u32,
}

/// What one render of the form hands back to the event loop.
struct Form {
    text: String,
    update: Update<Map<String, Value>>,
    reset: Reset,
}

fn initial_profile() -> anyhow::Result<Map<String, Value>> {
    let profile = Profile {
        name: "Daniel".into(),
        last_name: "Doe".into(),
        age: 10,
    };
    Ok(object(serde_json::to_value(profile)?)?)
}

fn profile_form(initial: Map<String, Value>) -> anyhow::Result<Form> {
    let (state, update, reset) = use_ez_state(initial, None);
    let profile: Profile =
        serde_json::from_value(Value::Object(state)).context("state no longer a profile")?;
    Ok(Form {
        text: format!(
            "{} {} (age {})",
            profile.name, profile.last_name, profile.age
        ),
        update,
        reset,
    })
}

enum Event {
    Rename(&'static str),
    Birthday,
    Reset,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let initial = initial_profile()?;
    let mut host = Host::new();
    let mut form = host.render(|| profile_form(initial.clone()))??;
    println!("render {}: {}", host.render_count(), form.text);

    let events = [
        Event::Rename("John"),
        Event::Birthday,
        Event::Birthday,
        Event::Reset,
        Event::Reset,
    ];

    for event in events {
        match event {
            Event::Rename(name) => form.update.merge(object(json!({ "name": name }))?),
            Event::Birthday => form.update.derive(|s| {
                let age = s.get("age").and_then(Value::as_u64).unwrap_or(0);
                let mut patch = Map::new();
                patch.insert("age".into(), (age + 1).into());
                patch
            }),
            Event::Reset => form.reset.reset(),
        }

        if host.is_dirty() {
            form = host.render(|| profile_form(initial.clone()))??;
            println!("render {}: {}", host.render_count(), form.text);
        } else {
            log::info!("nothing changed; render skipped");
        }
    }

    host.unmount();
    Ok(())
}
