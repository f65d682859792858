use crate::domain::model::DiagramSet;
use crate::utils::error::Result;

pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
    /// Where `path` ends up once written, for logging and viewers.
    fn location(&self, path: &str) -> String;
}

pub trait ConfigProvider {
    fn dataset_path(&self) -> &str;
    fn nodes_path(&self) -> Option<&str>;
    fn elements_path(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn open_figures(&self) -> bool;
}

pub trait Pipeline {
    /// Loaded inputs handed from `extract` to `transform`.
    type Input;

    fn name(&self) -> &str;
    fn extract(&self) -> Result<Self::Input>;
    fn transform(&self, input: Self::Input) -> Result<DiagramSet>;
    fn load(&self, diagrams: DiagramSet) -> Result<Vec<String>>;
}
