//! Tera-backed template engine.

use std::error::Error as _;

use tera::{Context, Tera};
use tracing::instrument;

use cobrakit_core::{
    application::{ApplicationError, ports::TemplateEngine},
    domain::BoundData,
    error::{CoreError, CoreResult},
};

/// Renders one template at a time with a fresh [`Tera`] instance.
///
/// Autoescaping is off: the output is Go source and plain-text licenses.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeraRenderer;

impl TeraRenderer {
    pub fn new() -> Self {
        Self
    }
}

/// Substitution namespace for one bound-data case.
fn context_for(data: &BoundData) -> tera::Result<Context> {
    match data {
        BoundData::Main(d) => Context::from_serialize(d),
        BoundData::Root(d) => Context::from_serialize(d),
        BoundData::License(d) => Context::from_serialize(d),
        BoundData::SubCommand(d) => {
            let mut context = Context::new();
            context.insert("project", &d.project);
            context.insert("command", &d.command);
            if let Some(header) = &d.header {
                context.insert("header", header);
            }
            Ok(context)
        }
    }
}

/// The tera error and every cause beneath it, joined with `: `.
fn describe(error: &tera::Error) -> String {
    let mut reason = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = cause.source();
    }
    reason
}

fn rendering_failed(template: &str, error: &tera::Error) -> CoreError {
    ApplicationError::RenderingFailed {
        template: template.to_string(),
        reason: describe(error),
    }
    .into()
}

impl TemplateEngine for TeraRenderer {
    #[instrument(skip(self, source, data), fields(kind = %data.kind()))]
    fn render(&self, name: &str, source: &str, data: &BoundData) -> CoreResult<String> {
        let context = context_for(data).map_err(|e| rendering_failed(name, &e))?;

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(name, source)
            .map_err(|e| rendering_failed(name, &e))?;
        tera.render(name, &context)
            .map_err(|e| rendering_failed(name, &e))
    }
}

#[cfg(test)]
mod tests {
    use cobrakit_core::domain::{
        CommandName, Copyright, LicenseCatalog, LicenseRecord, ProjectDescriptor,
    };

    use super::*;
    use crate::builtin_templates::builtin;

    fn project(license: &str) -> ProjectDescriptor {
        let catalog = LicenseCatalog::builtin();
        let def = *catalog.get(license).unwrap();
        let copyright = Copyright::new("2024", "Jane Doe");
        let record = if def.is_none() {
            LicenseRecord::none(def, copyright)
        } else {
            let header = builtin(&def.header_template()).unwrap();
            let body = builtin(&def.body_template()).unwrap();
            LicenseRecord::new(def, copyright, header, body)
        };
        let mut p = ProjectDescriptor::new(
            std::env::temp_dir().join("hello"),
            "example.com/hello",
        )
        .unwrap();
        p.set_license(record);
        p
    }

    fn render(name: &str, data: &BoundData) -> String {
        TeraRenderer::new()
            .render(name, builtin(name).unwrap(), data)
            .unwrap()
    }

    #[test]
    fn license_body_gets_copyright_line() {
        let p = project("mit");
        let text = render("license_mit", &BoundData::license(p.license().unwrap()));
        assert!(text.starts_with("The MIT License (MIT)\n\nCopyright © 2024 Jane Doe\n"));
    }

    #[test]
    fn main_with_header_is_a_block_comment_before_package() {
        let p = project("apache2");
        let text = render("main", &BoundData::main(&p, p.license().unwrap()));
        assert!(text.starts_with("/*\nCopyright © 2024 Jane Doe\n\nLicensed under the Apache"));
        assert!(text.contains("*/\npackage main\n"));
        assert!(text.contains("import \"example.com/hello/cmd\""));
    }

    #[test]
    fn html_characters_are_not_escaped() {
        let mut p = project("mit");
        p.set_license(LicenseRecord::new(
            *LicenseCatalog::builtin().get("mit").unwrap(),
            Copyright::new("2024", "Jane <jane@example.com>"),
            "h",
            "b",
        ));
        let text = render("main", &BoundData::main(&p, p.license().unwrap()));
        assert!(text.contains("Jane <jane@example.com>"));
    }

    #[test]
    fn root_toggles_viper() {
        let mut p = project("none");
        let plain = render("root_none", &BoundData::root(&p, p.license().unwrap()));
        assert!(!plain.contains("viper"));
        assert!(plain.starts_with("package cmd\n\nimport (\n\t\"os\"\n"));

        p.set_viper(true);
        let with_viper = render("root_none", &BoundData::root(&p, p.license().unwrap()));
        assert!(with_viper.contains("\t\"github.com/spf13/viper\"\n)"));
        assert!(with_viper.contains("func initConfig() {"));
        assert!(with_viper.contains("Use:   \"hello\""));
    }

    #[test]
    fn sub_command_reuses_header_verbatim() {
        let mut p = project("none");
        p.set_parent_command("configCmd");
        let name = CommandName::parse("get-value").unwrap();
        let data = BoundData::sub_command(&p, &name, Some("Copyright © 1999 X\n\nCustom."));

        let text = render("add_command", &data);
        assert!(text.starts_with("/*\nCopyright © 1999 X\n\nCustom.\n*/\npackage cmd\n"));
        assert!(text.contains("var getValueCmd = &cobra.Command{"));
        assert!(text.contains("\tconfigCmd.AddCommand(getValueCmd)"));
    }

    #[test]
    fn syntax_error_names_the_template() {
        let p = project("none");
        let err = TeraRenderer::new()
            .render("broken", "{% if %}", &BoundData::main(&p, p.license().unwrap()))
            .unwrap_err();
        let CoreError::Application(ApplicationError::RenderingFailed { template, reason }) = err
        else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(template, "broken");
        assert!(!reason.is_empty());
    }

    #[test]
    fn unknown_variable_is_an_error() {
        let p = project("none");
        let err = TeraRenderer::new()
            .render("t", "{{ nope }}", &BoundData::main(&p, p.license().unwrap()))
            .unwrap_err();
        assert!(err.to_string().contains("'t'"));
    }
}
