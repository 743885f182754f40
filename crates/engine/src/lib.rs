//! Orchestrates task resolution, rule/skill discovery, selector filtering,
//! bootstrap, and parameter/command expansion into a single deterministic
//! `Result`.

pub mod cancel;
pub mod error;
pub mod options;
pub mod result;
mod subject;

pub use cancel::CancellationToken;
pub use error::Error;
pub use options::{resolve as resolve_options, EngineOptions, Overrides};
pub use result::{EngineResult, EntryResult, SkillEntry, SkillsManifest};

use context_engine_discovery::{discover, resolve_task};
use context_engine_markdown::{CommandFrontMatter, Markdown, RuleFrontMatter, SkillFrontMatter};
use context_engine_params::Params;
use context_engine_selector::Selectors;
use context_engine_task::{parse_task, Block, Task};
use std::path::{Path, PathBuf};
use subject::ContentSubject;

pub struct Engine {
    options: EngineOptions,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn run(&self, task_name: &str) -> Result<EngineResult, Error> {
        let candidates = discover(&self.options.search_paths, None);

        // Step 1: locate the task.
        let mut selectors = self.options.selectors.clone();
        let (task_path, task_md) = resolve_task(&candidates.tasks, task_name, &selectors)?;

        // Step 2: merge the task's own selector sugar, validate agent override.
        for (key, value) in task_md.frontmatter.selectors.clone() {
            for v in value.into_values() {
                selectors.set_value(key.clone(), v);
            }
        }
        for language in &task_md.frontmatter.languages {
            selectors.set_value("languages", language.clone());
        }
        selectors.set_value("task_names", task_name);
        if let Some(agent) = &task_md.frontmatter.agent {
            context_engine_agents::AgentId::parse(agent)?;
        }

        // Step 3: log resolved params/selectors exactly once.
        tracing::info!(
            task = %task_name,
            params = ?self.options.params,
            selectors = ?selectors,
            "resolved task parameters and selectors"
        );

        // Step 4: rule pass (bootstrap-disabled mode also skips skill discovery, §4.8).
        let mut rules_out = Vec::new();
        if self.options.bootstrap {
            rules_out = self.run_rules(&candidates.rules, &selectors)?;
        }

        // Step 5: command pass on the task body.
        let task_dir = task_path.parent().unwrap_or_else(|| Path::new("."));
        let parsed = parse_task(&task_md.body)?;
        let (substituted, rules_out) =
            self.substitute_commands(parsed, &candidates.commands, &mut selectors, rules_out)?;

        let task_expand = task_md.frontmatter.expand.unwrap_or(true);
        let mut final_body = context_engine_expander::expand(
            &substituted,
            &self.options.params,
            task_dir,
            self.options.shell.as_ref(),
            task_expand,
        );
        let mut rules_out = rules_out;

        // Step 6: user-prompt append, parsed and expanded identically.
        if let Some(prompt) = &self.options.user_prompt {
            let parsed_prompt = parse_task(prompt)?;
            let (substituted_prompt, narrowed_rules) = self.substitute_commands(
                parsed_prompt,
                &candidates.commands,
                &mut selectors,
                rules_out,
            )?;
            rules_out = narrowed_rules;
            let expanded_prompt = context_engine_expander::expand(
                &substituted_prompt,
                &self.options.params,
                task_dir,
                self.options.shell.as_ref(),
                task_expand,
            );
            final_body.push_str("---\n");
            final_body.push_str(&expanded_prompt);
        }

        let task_tokens = context_engine_tokens::estimate_tokens(&final_body);

        // Step 7: skill pass.
        let skills = if self.options.bootstrap {
            self.run_skills(&candidates.skills, &selectors)?
        } else {
            Vec::new()
        };

        // Step 8: token accounting.
        let tokens = task_tokens + rules_out.iter().map(|r| r.tokens).sum::<usize>();

        Ok(EngineResult {
            task: EntryResult {
                frontmatter: task_md.frontmatter,
                content: final_body,
                tokens: task_tokens,
            },
            rules: rules_out,
            skills: SkillsManifest { skills },
            tokens,
        })
    }

    fn run_rules(
        &self,
        rule_candidates: &[PathBuf],
        selectors: &Selectors,
    ) -> Result<Vec<EntryResult<RuleFrontMatter>>, Error> {
        let mut kept = Vec::new();
        for rule_path in rule_candidates {
            if self.options.cancellation.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let rule_md: Markdown<RuleFrontMatter> = context_engine_markdown::load(rule_path, "rules")?;
            context_engine_bootstrap::run(
                rule_path,
                rule_md.frontmatter.bootstrap.as_deref(),
                self.options.shell.as_ref(),
            )?;

            let subject = ContentSubject(&rule_md.frontmatter.content);
            let (matched, reason) = selectors.matches(&subject);
            if !matched {
                tracing::debug!(rule = %rule_path.display(), reason = %reason, "rule dropped");
                continue;
            }
            tracing::debug!(rule = %rule_path.display(), "rule kept");

            let expand_enabled = rule_md.frontmatter.expand.unwrap_or(true);
            let rule_dir = rule_path.parent().unwrap_or_else(|| Path::new("."));
            let expanded = context_engine_expander::expand(
                &rule_md.body,
                &self.options.params,
                rule_dir,
                self.options.shell.as_ref(),
                expand_enabled,
            );
            let tokens = context_engine_tokens::estimate_tokens(&expanded);
            kept.push(EntryResult {
                frontmatter: rule_md.frontmatter,
                content: expanded,
                tokens,
            });
        }
        Ok(kept)
    }

    /// Replaces each `SlashCommand` block with its expanded command body,
    /// unioning the command's selectors into `selectors` and re-testing
    /// already-kept rules against the widened selector set (§4.9 step 5,
    /// resolved open question: command-level selectors re-filter rules).
    fn substitute_commands(
        &self,
        parsed: Task,
        command_candidates: &[PathBuf],
        selectors: &mut Selectors,
        mut rules_out: Vec<EntryResult<RuleFrontMatter>>,
    ) -> Result<(String, Vec<EntryResult<RuleFrontMatter>>), Error> {
        let mut out = String::new();
        let mut saw_command = false;

        for block in parsed.blocks {
            match block {
                Block::Text(text) => out.push_str(&text),
                Block::SlashCommand(command) => {
                    saw_command = true;
                    if self.options.cancellation.is_cancelled() {
                        return Err(Error::Cancelled);
                    }

                    let command_path = command_candidates
                        .iter()
                        .find(|path| {
                            path.file_stem().and_then(|s| s.to_str()) == Some(command.name.as_str())
                        })
                        .ok_or_else(|| Error::CommandNotFound(command.name.clone()))?;

                    let command_md: Markdown<CommandFrontMatter> =
                        context_engine_markdown::load(command_path, "commands")?;

                    let mut effective_params: Params = command.effective_params()?;
                    effective_params.underlay(&self.options.params);

                    for (key, value) in command_md.frontmatter.selectors.clone() {
                        for v in value.into_values() {
                            selectors.set_value(key.clone(), v);
                        }
                    }

                    let expand_enabled = command_md.frontmatter.expand.unwrap_or(true);
                    let command_dir = command_path.parent().unwrap_or_else(|| Path::new("."));
                    let expanded = context_engine_expander::expand(
                        &command_md.body,
                        &effective_params,
                        command_dir,
                        self.options.shell.as_ref(),
                        expand_enabled,
                    );
                    out.push_str(&expanded);
                }
            }
        }

        if saw_command {
            rules_out.retain(|rule| {
                let subject = ContentSubject(&rule.frontmatter.content);
                let (matched, reason) = selectors.matches(&subject);
                if !matched {
                    tracing::debug!(
                        rule = %rule.frontmatter.fields.id,
                        reason = %reason,
                        "rule dropped after command-level selector re-evaluation"
                    );
                }
                matched
            });
        }

        Ok((out, rules_out))
    }

    fn run_skills(
        &self,
        skill_candidates: &[PathBuf],
        selectors: &Selectors,
    ) -> Result<Vec<SkillEntry>, Error> {
        let mut kept = Vec::new();
        for skill_path in skill_candidates {
            if self.options.cancellation.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let skill_md: Markdown<SkillFrontMatter> =
                context_engine_markdown::load(skill_path, "skills")?;
            let validation = context_engine_validate::validate_skill(skill_path, &skill_md.frontmatter);
            if !validation.is_valid() {
                let reason = validation
                    .issues
                    .iter()
                    .find(|issue| issue.severity == context_engine_validate::Severity::Error)
                    .map(|issue| issue.message.clone())
                    .unwrap_or_default();
                return Err(Error::SkillInvalid {
                    path: skill_path.clone(),
                    reason,
                });
            }

            let subject = ContentSubject(&skill_md.frontmatter.content);
            if !selectors.matches(&subject).0 {
                continue;
            }

            let location = skill_path.canonicalize().unwrap_or_else(|_| skill_path.clone());
            kept.push(SkillEntry {
                name: skill_md.frontmatter.fields.name.clone(),
                description: skill_md.frontmatter.fields.description.clone(),
                location,
            });
        }
        Ok(kept)
    }
}
