use crate::{error::Error, object::SgObject};

///
/// Trail
///
/// Identities of the objects on the current traversal path, outermost
/// first. Entering an object that is already on the path is a cycle.
/// Objects shared by two sibling branches are not on each other's path and
/// are visited once per branch.
///

#[derive(Debug, Default)]
pub(crate) struct Trail {
    ancestors: Vec<usize>,
}

impl Trail {
    pub(crate) fn enter(&mut self, object: &dyn SgObject) -> Result<(), Error> {
        let id = object.object_id();
        if self.ancestors.contains(&id) {
            return Err(Error::cycle(format!(
                "object graph revisits `{}` while it is still being traversed (depth {})",
                object.name(),
                self.ancestors.len()
            )));
        }
        self.ancestors.push(id);

        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.ancestors.pop();
    }
}
