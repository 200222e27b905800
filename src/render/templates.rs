use std::path::{Path, PathBuf};

use regex_lite::Regex;
use tera::{Context, Tera};

use crate::error::{BuildError, Result};
use crate::paths::normalized_name;

/// Templates read from the project root on demand, keyed by root-relative
/// path.
///
/// Loading a subtemplate also loads whatever it `extends`, `include`s or
/// `import`s, parents first, so templates that no selected target reaches
/// are never read or parsed.
pub struct TemplateSet {
    root: PathBuf,
    tera: Tera,
}

impl TemplateSet {
    pub fn new(root: &Path) -> Self {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        Self {
            root: root.to_path_buf(),
            tera,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.tera.get_template_names().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make sure the template at `subtemplate_path` and everything it
    /// references is registered. Returns the template name.
    pub fn ensure_loaded(&mut self, subtemplate_path: &Path) -> Result<String> {
        let name = normalized_name(subtemplate_path);
        self.load_with_references(&name, &mut Vec::new())?;
        Ok(name)
    }

    fn load_with_references(&mut self, name: &str, loading: &mut Vec<String>) -> Result<()> {
        if self.contains(name) || loading.iter().any(|l| l == name) {
            return Ok(());
        }

        let path = self.root.join(name);
        if !path.is_file() {
            return Err(BuildError::TemplateNotFound { path });
        }
        let content = std::fs::read_to_string(&path).map_err(|e| BuildError::Io {
            context: format!("reading template {}", path.display()),
            source: e,
        })?;

        loading.push(name.to_string());
        for reference in template_references(&content) {
            self.load_with_references(&reference, loading)?;
        }
        loading.pop();

        if let Err(e) = self.tera.add_raw_template(name, &content) {
            // A template whose parent failed to resolve is already registered;
            // drop it so later loads don't trip over it again.
            self.tera.templates.remove(name);
            return Err(BuildError::TemplateParse {
                name: name.to_string(),
                source: e,
            });
        }
        Ok(())
    }

    pub fn render(&mut self, subtemplate_path: &Path, context: &Context) -> Result<String> {
        let name = self.ensure_loaded(subtemplate_path)?;
        self.tera
            .render(&name, context)
            .map_err(|e| BuildError::RenderError {
                file: name,
                source: e,
            })
    }
}

/// Names of the templates a template pulls in through `extends`, `include`
/// (including the list form) and `import`.
fn template_references(content: &str) -> Vec<String> {
    let tag_re = Regex::new(r#"\{%-?\s*(?:extends|include|import)\s+(\[[^\]]*\]|"[^"]*"|'[^']*')"#)
        .expect("valid regex");
    let name_re = Regex::new(r#""([^"]*)"|'([^']*)'"#).expect("valid regex");

    let mut names = Vec::new();
    for tag in tag_re.captures_iter(content) {
        for quoted in name_re.captures_iter(&tag[1]) {
            if let Some(name) = quoted.get(1).or_else(|| quoted.get(2)) {
                let name = normalized_name(Path::new(name.as_str()));
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[rstest]
    #[case(r#"{% extends "templates/base.html.template" %}"#, vec!["templates/base.html.template"])]
    #[case(r#"{%- include 'parts/nav.html' -%}"#, vec!["parts/nav.html"])]
    #[case(r#"{% import "macros.html" as m %}"#, vec!["macros.html"])]
    #[case(r#"{% include ["a.html", "./b.html"] ignore missing %}"#, vec!["a.html", "b.html"])]
    #[case(r#"{{ name }} {% if x %}include "nope"{% endif %}"#, vec![])]
    fn test_template_references(#[case] content: &str, #[case] expected: Vec<&str>) {
        assert_eq!(template_references(content), expected);
    }

    #[test]
    fn renders_subtemplate_extending_shared_layout() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "templates/base.html.template",
            "<html><body>{% block content %}{% endblock content %}</body></html>",
        );
        write(
            dir.path(),
            "App/new.html.subtemplate",
            r#"{% extends "templates/base.html.template" %}{% block content %}<h1>{{ name }}</h1>{% endblock content %}"#,
        );

        let mut set = TemplateSet::new(dir.path());
        assert!(set.is_empty());

        let mut context = Context::new();
        context.insert("name", "App");
        let html = set
            .render(Path::new("App/new.html.subtemplate"), &context)
            .unwrap();
        assert_eq!(html, "<html><body><h1>App</h1></body></html>");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn renders_includes() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "parts/nav.html", "<nav>{{ name }}</nav>");
        write(
            dir.path(),
            "App/new.html.subtemplate",
            r#"{% include "parts/nav.html" %}<main></main>"#,
        );

        let mut set = TemplateSet::new(dir.path());
        let mut context = Context::new();
        context.insert("name", "App");
        let html = set
            .render(Path::new("./App/new.html.subtemplate"), &context)
            .unwrap();
        assert_eq!(html, "<nav>App</nav><main></main>");
        assert!(set.contains("App/new.html.subtemplate"));
    }

    #[test]
    fn does_not_escape_html_values() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "App/new.html.subtemplate", "{{ snippet }}");
        let mut set = TemplateSet::new(dir.path());

        let mut context = Context::new();
        context.insert("snippet", "<b>bold</b>");
        let html = set
            .render(Path::new("App/new.html.subtemplate"), &context)
            .unwrap();
        assert_eq!(html, "<b>bold</b>");
    }

    #[test]
    fn unrelated_broken_templates_are_never_parsed() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "App/new.html.subtemplate", "Hello {{ name }}");
        write(dir.path(), "Labs/new.html.subtemplate", "{% if %}");
        write(dir.path(), "legacy/page.template", "<%= not tera %>{% endfor %}");

        let mut set = TemplateSet::new(dir.path());
        let mut context = Context::new();
        context.insert("name", "World");
        let html = set
            .render(Path::new("App/new.html.subtemplate"), &context)
            .unwrap();
        assert_eq!(html, "Hello World");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn missing_subtemplate_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut set = TemplateSet::new(dir.path());
        let result = set.render(Path::new("Nope/new.html.subtemplate"), &Context::new());
        match result {
            Err(BuildError::TemplateNotFound { path }) => {
                assert!(path.ends_with("Nope/new.html.subtemplate"));
            }
            _ => panic!("expected TemplateNotFound"),
        }
    }

    #[test]
    fn missing_parent_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "App/new.html.subtemplate",
            r#"{% extends "templates/gone.html.template" %}"#,
        );
        let mut set = TemplateSet::new(dir.path());
        let result = set.ensure_loaded(Path::new("App/new.html.subtemplate"));
        match result {
            Err(BuildError::TemplateNotFound { path }) => {
                assert!(path.ends_with("templates/gone.html.template"));
            }
            _ => panic!("expected TemplateNotFound"),
        }
    }

    #[test]
    fn syntax_error_names_the_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "templates/base.html.template", "{% if %}");
        write(
            dir.path(),
            "App/new.html.subtemplate",
            r#"{% extends "templates/base.html.template" %}"#,
        );

        let mut set = TemplateSet::new(dir.path());
        let result = set.ensure_loaded(Path::new("App/new.html.subtemplate"));
        match result {
            Err(e @ BuildError::TemplateParse { .. }) => {
                assert_eq!(
                    e.to_string(),
                    "Failed to load template templates/base.html.template"
                );
            }
            _ => panic!("expected TemplateParse"),
        }
    }

    #[test]
    fn circular_extends_does_not_recurse_forever() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.html", r#"{% extends "b.html" %}"#);
        write(dir.path(), "b.html", r#"{% extends "a.html" %}"#);

        let mut set = TemplateSet::new(dir.path());
        let result = set.ensure_loaded(Path::new("a.html"));
        assert!(matches!(result, Err(BuildError::TemplateParse { .. })));
        assert!(set.is_empty());

        write(dir.path(), "c.html", "fine");
        assert_eq!(set.ensure_loaded(Path::new("c.html")).unwrap(), "c.html");
    }

    #[test]
    fn undefined_variable_is_render_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "App/new.html.subtemplate", "{{ missing }}");
        let mut set = TemplateSet::new(dir.path());
        let result = set.render(Path::new("App/new.html.subtemplate"), &Context::new());
        assert!(matches!(result, Err(BuildError::RenderError { .. })));
    }
}
