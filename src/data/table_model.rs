use crate::view::index_space::TotalIndex;

/// The dataset model a [`crate::view::column_view::ColumnView`] presents.
///
/// Column names are the stable, unaliased identity of a column and must be
/// unique within a model. Titles are what the header shows and may collide.
pub trait TableModel {
    /// Number of columns the model knows about, displayable or not
    fn column_count(&self) -> usize;

    /// Unaliased name of the column at `index`
    fn column_name(&self, index: TotalIndex) -> Option<&str>;

    /// Header title, the alias when one is set
    fn column_title(&self, index: TotalIndex) -> Option<&str> {
        self.column_name(index)
    }

    /// Whether the column may ever be shown. Internal and helper columns
    /// return false.
    fn is_displayable(&self, index: TotalIndex) -> bool;

    fn row_count(&self) -> usize;

    /// Resolve a column name to its current total index
    fn column_index(&self, name: &str) -> Option<TotalIndex> {
        (0..self.column_count())
            .map(TotalIndex)
            .find(|&idx| self.column_name(idx) == Some(name))
    }

    /// Names of all displayable columns in total-index order
    fn displayable_names(&self) -> Vec<String> {
        (0..self.column_count())
            .map(TotalIndex)
            .filter(|&idx| self.is_displayable(idx))
            .filter_map(|idx| self.column_name(idx).map(str::to_string))
            .collect()
    }
}
