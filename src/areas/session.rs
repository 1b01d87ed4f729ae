use crate::areas::workspace::Workspace;
use crate::artifacts::lines::DiffOptions;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Everything a command needs: where to read inputs, where to write output and
/// how to diff.
pub struct Session {
    writer: RefCell<Box<dyn std::io::Write>>,
    workspace: Workspace,
    options: DiffOptions,
}

impl Session {
    pub fn new(
        path: &str,
        writer: Box<dyn std::io::Write>,
        options: DiffOptions,
    ) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;

        Ok(Session {
            writer: RefCell::new(writer),
            workspace: Workspace::new(path.into_boxed_path()),
            options,
        })
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn options(&self) -> DiffOptions {
        self.options
    }
}
