use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// One resource instance from Terraform state, with its attributes flattened
/// the way Terraform's own test checks address them (`tags.%`, `tags.env`,
/// `ip_rules.#`, `ip_rules.0`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceState {
    pub address: String,
    pub resource_type: String,
    pub id: String,
    pub attributes: BTreeMap<String, String>,
}

impl InstanceState {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// The resources of a `terraform show -json` document, keyed by address
#[derive(Debug, Clone, Default)]
pub struct State {
    resources: BTreeMap<String, InstanceState>,
}

#[derive(Deserialize)]
struct ShowOutput {
    #[serde(default)]
    values: Option<StateValues>,
}

#[derive(Deserialize)]
struct StateValues {
    root_module: StateModule,
}

#[derive(Deserialize)]
struct StateModule {
    #[serde(default)]
    resources: Vec<StateResource>,
    #[serde(default)]
    child_modules: Vec<StateModule>,
}

#[derive(Deserialize)]
struct StateResource {
    address: String,
    #[serde(rename = "type")]
    resource_type: String,
    #[serde(default)]
    values: Value,
}

impl State {
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        let output: ShowOutput = serde_json::from_str(input)?;
        let mut state = Self::default();
        if let Some(values) = output.values {
            state.collect(values.root_module);
        }
        Ok(state)
    }

    fn collect(&mut self, module: StateModule) {
        for resource in module.resources {
            let mut attributes = BTreeMap::new();
            flatten("", &resource.values, &mut attributes);
            let id = attributes.get("id").cloned().unwrap_or_default();
            self.resources.insert(
                resource.address.clone(),
                InstanceState {
                    address: resource.address,
                    resource_type: resource.resource_type,
                    id,
                    attributes,
                },
            );
        }
        for child in module.child_modules {
            self.collect(child);
        }
    }

    pub fn insert(&mut self, instance: InstanceState) {
        self.resources.insert(instance.address.clone(), instance);
    }

    pub fn get(&self, address: &str) -> Option<&InstanceState> {
        self.resources.get(address)
    }

    pub fn of_type<'a>(&'a self, resource_type: &'a str) -> impl Iterator<Item = &'a InstanceState> + 'a {
        self.resources
            .values()
            .filter(move |r| r.resource_type == resource_type)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut BTreeMap<String, String>) {
    let key = |suffix: &str| {
        if prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{prefix}.{suffix}")
        }
    };

    match value {
        Value::Null => {}
        Value::Object(map) => {
            if !prefix.is_empty() {
                out.insert(key("%"), map.len().to_string());
            }
            for (k, v) in map {
                flatten(&key(k), v, out);
            }
        }
        Value::Array(items) => {
            out.insert(key("#"), items.len().to_string());
            for (i, v) in items.iter().enumerate() {
                flatten(&key(&i.to_string()), v, out);
            }
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        Value::Bool(b) => {
            out.insert(prefix.to_string(), b.to_string());
        }
        Value::Number(n) => {
            out.insert(prefix.to_string(), n.to_string());
        }
    }
}
