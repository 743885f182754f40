//! The eight end-to-end scenarios from the orchestrator's behavioral spec.

use context_engine::{Engine, EngineOptions, Error};
use context_engine_discovery::Root;
use context_engine_params::Params;
use context_engine_selector::Selectors;
use context_engine_test_utils::ProjectFixture;

fn options_for(fixture: &ProjectFixture) -> EngineOptions {
    EngineOptions {
        search_paths: vec![Root::Local(fixture.root().to_path_buf())],
        ..EngineOptions::default()
    }
}

#[test]
fn simple_task_with_params() {
    let fixture = ProjectFixture::new().unwrap();
    fixture.write_task("simple", "", "Environment: ${env}\nFeature: ${feature}\n");

    let mut params = Params::new();
    params.insert("env", "prod".to_string());
    params.insert("feature", "auth".to_string());

    let options = EngineOptions {
        params,
        ..options_for(&fixture)
    };
    let result = Engine::new(options).run("simple").unwrap();

    assert_eq!(result.task.content, "Environment: prod\nFeature: auth\n");
    assert!(result.task.tokens > 0);
}

#[test]
fn selector_filtering_or_within_key_and_across_keys() {
    let fixture = ProjectFixture::new().unwrap();
    fixture.write_task(
        "deploy",
        "selectors:\n  env: production\n",
        "Deploy\n",
    );
    fixture.write_rule("prod-rule", "env: production\n", "Prod rule\n");
    fixture.write_rule("dev-rule", "env: development\n", "Dev rule\n");
    fixture.write_rule("no-env", "", "No-env rule\n");
    fixture.write_rule("test-rule", "env: test\n", "Test rule\n");

    let mut selectors = Selectors::new();
    selectors.set_value("env", "development");

    let options = EngineOptions {
        selectors,
        ..options_for(&fixture)
    };
    let result = Engine::new(options).run("deploy").unwrap();

    let kept: Vec<&str> = result
        .rules
        .iter()
        .map(|r| r.frontmatter.fields.id.as_str())
        .collect();
    assert!(kept.contains(&"rules/prod-rule"));
    assert!(kept.contains(&"rules/dev-rule"));
    assert!(kept.contains(&"rules/no-env"));
    assert!(!kept.contains(&"rules/test-rule"));
}

#[test]
fn languages_and_task_names_sugar_filters_rules() {
    let fixture = ProjectFixture::new().unwrap();
    fixture.write_task("deploy", "languages:\n  - rust\n", "Deploy\n");
    fixture.write_rule("rust-rule", "languages:\n  - rust\n", "Rust rule\n");
    fixture.write_rule("go-rule", "languages:\n  - go\n", "Go rule\n");
    fixture.write_rule("deploy-only", "task_names:\n  - deploy\n", "Deploy-only rule\n");
    fixture.write_rule("release-only", "task_names:\n  - release\n", "Release-only rule\n");

    let options = options_for(&fixture);
    let result = Engine::new(options).run("deploy").unwrap();

    let kept: Vec<&str> = result
        .rules
        .iter()
        .map(|r| r.frontmatter.fields.id.as_str())
        .collect();
    assert!(kept.contains(&"rules/rust-rule"));
    assert!(!kept.contains(&"rules/go-rule"));
    assert!(kept.contains(&"rules/deploy-only"));
    assert!(!kept.contains(&"rules/release-only"));
}

#[test]
fn slash_command_substitution_with_call_site_param_precedence() {
    let fixture = ProjectFixture::new().unwrap();
    fixture.write_task("use-msg", "", "/msg value=\"specific\"\n");
    fixture.write_command("msg", "", "Value: ${value}");

    let mut params = Params::new();
    params.insert("value", "general".to_string());

    let options = EngineOptions {
        params,
        ..options_for(&fixture)
    };
    let result = Engine::new(options).run("use-msg").unwrap();

    assert!(result.task.content.contains("Value: specific"));
}

#[test]
fn command_not_found_is_fatal() {
    let fixture = ProjectFixture::new().unwrap();
    fixture.write_task("broken", "", "/nonexistent\n");

    let options = options_for(&fixture);
    let err = Engine::new(options).run("broken").unwrap_err();

    assert!(matches!(err, Error::CommandNotFound(name) if name == "nonexistent"));
}

#[test]
fn skill_discovery_with_bootstrap_disabled() {
    let fixture = ProjectFixture::new().unwrap();
    fixture.write_task("noop", "", "Body\n");
    fixture.write_skill(
        "s",
        "name: s\ndescription: a valid skill\n",
        "Skill body\n",
    );

    let options = EngineOptions {
        bootstrap: false,
        ..options_for(&fixture)
    };
    let result = Engine::new(options).run("noop").unwrap();

    assert!(result.skills.skills.is_empty());
}

#[test]
fn skill_validation_rejects_missing_description() {
    let fixture = ProjectFixture::new().unwrap();
    fixture.write_task("noop", "", "Body\n");
    fixture.write_skill("x", "name: x\n", "Skill body\n");

    let options = options_for(&fixture);
    let err = Engine::new(options).run("noop").unwrap_err();

    assert!(matches!(err, Error::SkillInvalid { .. }));
}

#[test]
fn resume_with_bootstrap_still_on_discovers_rules() {
    let fixture = ProjectFixture::new().unwrap();
    fixture.write_task("noop", "", "Body\n");
    fixture.write_rule("always", "", "Always-on rule\n");

    let options = EngineOptions {
        resume: true,
        bootstrap: true,
        ..options_for(&fixture)
    };
    let result = Engine::new(options).run("noop").unwrap();

    assert_eq!(result.rules.len(), 1);
    assert_eq!(result.rules[0].frontmatter.fields.id, "rules/always");
}

#[test]
fn parameter_expansion_opt_out() {
    let fixture = ProjectFixture::new().unwrap();
    fixture.write_task("literal", "expand: false\n", "X: ${x}\n");

    let mut params = Params::new();
    params.insert("x", "1".to_string());

    let options = EngineOptions {
        params,
        ..options_for(&fixture)
    };
    let result = Engine::new(options).run("literal").unwrap();

    assert_eq!(result.task.content, "X: ${x}\n");
}
