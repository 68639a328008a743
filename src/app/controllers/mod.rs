pub(super) mod dialog_controller;
pub(super) mod table_controller;
pub(super) mod workflow_controller;
