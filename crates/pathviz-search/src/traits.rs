use pathviz_core::Grid;

/// Receives a signal whenever a search changes cell state.
///
/// The signal carries no data; the observer re-reads the grid.
pub trait Observer {
    fn changed(&mut self, grid: &Grid);
}

impl<F: FnMut(&Grid)> Observer for F {
    fn changed(&mut self, grid: &Grid) {
        self(grid)
    }
}

/// An [`Observer`] that ignores every signal.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoObserver;

impl Observer for NoObserver {
    fn changed(&mut self, _grid: &Grid) {}
}
