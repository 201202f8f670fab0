use crate::domain::{
    error::DomainError,
    identifier::{CommandName, ROOT_COMMAND},
    project::ProjectDescriptor,
};

/// Centralized domain validation.
///
/// Checks that span more than one value live here rather than on the values.
pub struct DomainValidator;

impl DomainValidator {
    /// A project is ready for sub-command planning once it has a command name
    /// that does not shadow the root command variable.
    pub fn validate_add_command(project: &ProjectDescriptor) -> Result<&CommandName, DomainError> {
        let name = project
            .command_name()
            .ok_or_else(|| DomainError::IdentifierInvalid {
                name: String::new(),
                reason: "no command name was given".into(),
            })?;

        let variable = format!("{name}Cmd");
        if variable == project.parent_command() {
            return Err(DomainError::IdentifierInvalid {
                name: name.to_string(),
                reason: format!("would shadow its parent '{}'", project.parent_command()),
            });
        }
        if name.as_str().eq_ignore_ascii_case(ROOT_COMMAND) {
            return Err(DomainError::IdentifierInvalid {
                name: name.to_string(),
                reason: "collides with the root command".into(),
            });
        }
        Ok(name)
    }
}
