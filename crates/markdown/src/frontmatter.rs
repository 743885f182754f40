//! Frontmatter entity types shared by tasks, rules, commands, and skills.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Raw passthrough value for an arbitrary frontmatter key.
pub type RawValue = serde_yaml::Value;

/// Selector sugar value: either a single scalar or a list of scalars.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ScalarOrList {
    Scalar(String),
    List(Vec<String>),
}

impl ScalarOrList {
    /// Expand into an owned vector, a scalar becoming a singleton list.
    pub fn into_values(self) -> Vec<String> {
        match self {
            ScalarOrList::Scalar(value) => vec![value],
            ScalarOrList::List(values) => values,
        }
    }
}

/// `id`, `name`, `description` as they appear in raw YAML, flattened into
/// every concrete frontmatter type below.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BaseFields {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Implemented by every frontmatter type so the loader can default `id` and
/// attach the raw key→value passthrough map (`content`) without knowing the
/// concrete type.
pub trait FrontMatter {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn set_content(&mut self, content: BTreeMap<String, RawValue>);
}

macro_rules! impl_front_matter {
    ($ty:ty) => {
        impl FrontMatter for $ty {
            fn id(&self) -> &str {
                &self.fields.id
            }
            fn set_id(&mut self, id: String) {
                self.fields.id = id;
            }
            fn set_content(&mut self, content: BTreeMap<String, RawValue>) {
                self.content = content;
            }
        }
    };
}

/// `.agents/tasks/*.md` frontmatter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFrontMatter {
    #[serde(flatten)]
    pub fields: BaseFields,
    pub agent: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    pub model: Option<String>,
    pub single_shot: Option<bool>,
    pub timeout: Option<u64>,
    pub resume: Option<bool>,
    #[serde(default)]
    pub selectors: BTreeMap<String, ScalarOrList>,
    pub expand: Option<bool>,
    #[serde(skip)]
    pub content: BTreeMap<String, RawValue>,
}

/// `.agents/rules/*.md` frontmatter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleFrontMatter {
    #[serde(flatten)]
    pub fields: BaseFields,
    #[serde(default)]
    pub task_names: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    pub agent: Option<String>,
    pub mcp_server: Option<RawValue>,
    pub expand: Option<bool>,
    pub bootstrap: Option<String>,
    #[serde(skip)]
    pub content: BTreeMap<String, RawValue>,
}

/// `.agents/commands/*.md` frontmatter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandFrontMatter {
    #[serde(flatten)]
    pub fields: BaseFields,
    pub expand: Option<bool>,
    #[serde(default)]
    pub selectors: BTreeMap<String, ScalarOrList>,
    #[serde(skip)]
    pub content: BTreeMap<String, RawValue>,
}

/// `SKILL.md` frontmatter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillFrontMatter {
    #[serde(flatten)]
    pub fields: BaseFields,
    pub license: Option<String>,
    pub compatibility: Option<String>,
    #[serde(skip)]
    pub content: BTreeMap<String, RawValue>,
}

impl_front_matter!(TaskFrontMatter);
impl_front_matter!(RuleFrontMatter);
impl_front_matter!(CommandFrontMatter);
impl_front_matter!(SkillFrontMatter);
