mod history;
mod workbench;
