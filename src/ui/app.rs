use crate::command::executor::{self, CommandRunner};
use crate::command::{Action, Command, Registry};
use crate::ui::buffer::OutputBuffer;

/// Message shown for entries without an action.
pub const NOT_IMPLEMENTED: &str = "Not implemented";

/// Dashboard state: the registry, the cursor into it and the output history.
pub struct App {
    pub registry: Registry,
    pub selected_index: usize,
    pub output: OutputBuffer,
    pub should_quit: bool,
    page_height: usize,
}

impl App {
    pub fn new(registry: Registry, history_limit: usize) -> Self {
        Self {
            registry,
            selected_index: 0,
            output: OutputBuffer::new(history_limit),
            should_quit: false,
            page_height: 1,
        }
    }

    pub fn next(&mut self) {
        let count = self.registry.len();

        if count > 0 {
            self.selected_index = (self.selected_index + 1) % count;
        }
    }

    pub fn previous(&mut self) {
        let count = self.registry.len();

        if count > 0 {
            self.selected_index = (self.selected_index + count - 1) % count;
        }
    }

    pub fn selected_command(&self) -> Option<&Command> {
        self.registry.get(self.selected_index)
    }

    /// Rows visible in the output pane; one page for PageUp/PageDown.
    pub fn page_height(&self) -> usize {
        self.page_height
    }

    pub fn set_page_height(&mut self, rows: usize) {
        self.page_height = rows;
        self.output.clamp(rows);
    }

    pub fn page_up(&mut self) {
        self.output.page_up(self.page_height);
    }

    pub fn page_down(&mut self) {
        self.output.page_down(self.page_height);
    }

    /// Run the selected command and append its result to the output.
    ///
    /// Blocks until the child exits. Launch failures become a line in the
    /// output instead of an error.
    pub fn activate_selected(&mut self, runner: &mut dyn CommandRunner) {
        let Some(command) = self.selected_command().cloned() else {
            return;
        };

        match &command.action {
            None => {
                log::info!("'{}' is not implemented", command.name);
                self.output.push_line(NOT_IMPLEMENTED);
                self.output.push_separator();
            }
            Some(Action::Exit) => {
                log::info!("'{}' selected, leaving", command.name);
                self.should_quit = true;
                return;
            }
            Some(action) => {
                let argv = action.argv();
                match executor::execute(runner, &command.name, &argv) {
                    Ok(output) => {
                        log::info!(
                            "'{}' finished with exit code {:?}",
                            command.name,
                            output.exit_code
                        );
                        self.output.push_text(&output.stdout);
                        self.output.push_text(&output.stderr);
                    }
                    Err(e) => {
                        log::warn!("{}", e);
                        self.output.push_line(e.to_string());
                    }
                }
                self.output.push_separator();
            }
        }

        self.output.scroll_to_bottom(self.page_height);
    }
}
