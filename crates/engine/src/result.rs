//! The shape returned from `Engine::run`.

use std::path::PathBuf;

/// One markdown entity after expansion: its typed frontmatter, expanded
/// content, and estimated token count.
#[derive(Debug, Clone)]
pub struct EntryResult<T> {
    pub frontmatter: T,
    pub content: String,
    pub tokens: usize,
}

#[derive(Debug, Clone)]
pub struct SkillEntry {
    pub name: String,
    pub description: String,
    pub location: PathBuf,
}

/// A manifest of surviving skills, serializable as the `<available_skills>`
/// XML document callers embed in a prompt; `location` is carried internally
/// but omitted from the XML.
#[derive(Debug, Clone, Default)]
pub struct SkillsManifest {
    pub skills: Vec<SkillEntry>,
}

impl SkillsManifest {
    pub fn to_xml(&self) -> String {
        let mut out = String::from("<available_skills>\n");
        for skill in &self.skills {
            out.push_str(&format!(
                "  <skill><name>{}</name><description>{}</description></skill>\n",
                xml_escape(&skill.name),
                xml_escape(&skill.description),
            ));
        }
        out.push_str("</available_skills>");
        out
    }
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[derive(Debug, Clone)]
pub struct EngineResult {
    pub task: EntryResult<context_engine_markdown::TaskFrontMatter>,
    pub rules: Vec<EntryResult<context_engine_markdown::RuleFrontMatter>>,
    pub skills: SkillsManifest,
    pub tokens: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xml_manifest_omits_location_and_escapes_entities() {
        let manifest = SkillsManifest {
            skills: vec![SkillEntry {
                name: "writer".into(),
                description: "writes <prose> & \"stuff\"".into(),
                location: PathBuf::from("/skills/writer/SKILL.md"),
            }],
        };
        let xml = manifest.to_xml();
        assert!(xml.contains("<name>writer</name>"));
        assert!(xml.contains("&lt;prose&gt; &amp; &quot;stuff&quot;"));
        assert!(!xml.contains("/skills/writer"));
    }

    #[test]
    fn empty_manifest_still_has_wrapper_element() {
        let manifest = SkillsManifest::default();
        assert_eq!(manifest.to_xml(), "<available_skills>\n</available_skills>");
    }
}
