#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Spanish,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "es" => Language::Spanish,
            _ => Language::English,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Español",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Language::English => Language::Spanish,
            Language::Spanish => Language::English,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey {
    Ok,
    Cancel,
    AppTitle,
    HeaderNoFile,
    PanelData,
    PanelSummary,
    PanelMessages,
    TableNoPreview,
    TableNoRows,
    TableNoColumns,
    TabEmptyMarker,
    SummaryRows,
    SummaryColumns,
    SummaryCells,
    SummarySheetRows,
    SummaryInserted,
    SummaryBatch,
    ValidationLabel,
    ValidationSkipped,
    ValidationPassed,
    ValidationWarning,
    ValidationBlocking,
    ChartNoData,
    ChartEmptyCells,
    ChartSum,
    ChartMin,
    ChartMax,
    ChartMean,
    IssueWarning,
    IssueSystem,
    IssueValidation,
    IssuesNone,
    ServerUnknown,
    ServerUp,
    ServerDown,
    WarnTitle,
    WarnCurrent,
    WarnRequired,
    WarnHint,
    DialogOpenFileTitle,
    DialogOpenFilePrompt,
    DialogSuggestions,
    DialogSuggestionHint,
    DialogEditCellTitle,
    DialogConfirmInsertTitle,
    DialogPreviewingTitle,
    DialogInsertingTitle,
    DialogPleaseWait,
    DialogResultTitle,
    DialogStatsTitle,
    DialogLogsTitle,
    DialogRecordsTitle,
    DialogListEmpty,
    DialogListHint,
    DialogKeyboardShortcutsTitle,
    DialogHelpHint,
    DialogErrorTitle,
    StatsTotalRecords,
    StatsTotalUploads,
    StatsSuccessful,
    StatsFailed,
    StatsApiVersion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    ConfirmInsert,
    ProgressRows,
    ResultBody,
    StatusTable,
    HelpTotal,
    ThemeToast,
    LanguageToast,
    RowDeletedToast,
    TableClearedToast,
    CellUpdatedToast,
    ChartTitle,
    ChartDistinct,
    ValidationMissing,
    ValidationUnexpected,
    EditCellPrompt,
    ServerHealthyToast,
    ServerStatusToast,
    ListCount,
}

#[derive(Debug, Clone, Copy)]
pub struct I18n {
    language: Language,
}

impl I18n {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(self) -> Language {
        self.language
    }

    pub fn tr(self, key: TextKey) -> &'static str {
        match (self.language, key) {
            (Language::English, TextKey::Ok) => "OK",
            (Language::Spanish, TextKey::Ok) => "Aceptar",
            (Language::English, TextKey::Cancel) => "Cancel",
            (Language::Spanish, TextKey::Cancel) => "Cancelar",
            (Language::English, TextKey::AppTitle) => "Excel Loader",
            (Language::Spanish, TextKey::AppTitle) => "Cargador Excel",
            (Language::English, TextKey::HeaderNoFile) => "No file selected",
            (Language::Spanish, TextKey::HeaderNoFile) => "Ningún archivo seleccionado",
            (Language::English, TextKey::PanelData) => "Data",
            (Language::Spanish, TextKey::PanelData) => "Datos",
            (Language::English, TextKey::PanelSummary) => "Summary",
            (Language::Spanish, TextKey::PanelSummary) => "Resumen",
            (Language::English, TextKey::PanelMessages) => "Messages",
            (Language::Spanish, TextKey::PanelMessages) => "Mensajes",
            (Language::English, TextKey::TableNoPreview) => {
                "Press o to choose an Excel file, then p to preview it"
            }
            (Language::Spanish, TextKey::TableNoPreview) => {
                "Pulsa o para elegir un archivo Excel y luego p para previsualizarlo"
            }
            (Language::English, TextKey::TableNoRows) => "(No rows)",
            (Language::Spanish, TextKey::TableNoRows) => "(Sin filas)",
            (Language::English, TextKey::TableNoColumns) => "(No columns)",
            (Language::Spanish, TextKey::TableNoColumns) => "(Sin columnas)",
            (Language::English, TextKey::TabEmptyMarker) => "empty",
            (Language::Spanish, TextKey::TabEmptyMarker) => "vacía",
            (Language::English, TextKey::SummaryRows) => "Rows",
            (Language::Spanish, TextKey::SummaryRows) => "Filas",
            (Language::English, TextKey::SummaryColumns) => "Columns",
            (Language::Spanish, TextKey::SummaryColumns) => "Columnas",
            (Language::English, TextKey::SummaryCells) => "Cells",
            (Language::Spanish, TextKey::SummaryCells) => "Celdas",
            (Language::English, TextKey::SummarySheetRows) => "Rows in sheet",
            (Language::Spanish, TextKey::SummarySheetRows) => "Filas en hoja",
            (Language::English, TextKey::SummaryInserted) => "Inserted",
            (Language::Spanish, TextKey::SummaryInserted) => "Insertadas",
            (Language::English, TextKey::SummaryBatch) => "Batch",
            (Language::Spanish, TextKey::SummaryBatch) => "Lote",
            (Language::English, TextKey::ValidationLabel) => "Columns check",
            (Language::Spanish, TextKey::ValidationLabel) => "Validación",
            (Language::English, TextKey::ValidationSkipped) => "not configured",
            (Language::Spanish, TextKey::ValidationSkipped) => "sin configurar",
            (Language::English, TextKey::ValidationPassed) => "all expected present",
            (Language::Spanish, TextKey::ValidationPassed) => "todas presentes",
            (Language::English, TextKey::ValidationWarning) => "partial match",
            (Language::Spanish, TextKey::ValidationWarning) => "coincidencia parcial",
            (Language::English, TextKey::ValidationBlocking) => "no expected column found",
            (Language::Spanish, TextKey::ValidationBlocking) => "ninguna columna esperada",
            (Language::English, TextKey::ChartNoData) => "No values to chart",
            (Language::Spanish, TextKey::ChartNoData) => "Sin valores para graficar",
            (Language::English, TextKey::ChartEmptyCells) => "Empty cells",
            (Language::Spanish, TextKey::ChartEmptyCells) => "Celdas vacías",
            (Language::English, TextKey::ChartSum) => "Sum",
            (Language::Spanish, TextKey::ChartSum) => "Suma",
            (Language::English, TextKey::ChartMin) => "Min",
            (Language::Spanish, TextKey::ChartMin) => "Mín",
            (Language::English, TextKey::ChartMax) => "Max",
            (Language::Spanish, TextKey::ChartMax) => "Máx",
            (Language::English, TextKey::ChartMean) => "Mean",
            (Language::Spanish, TextKey::ChartMean) => "Media",
            (Language::English, TextKey::IssueWarning) => "Warning",
            (Language::Spanish, TextKey::IssueWarning) => "Aviso",
            (Language::English, TextKey::IssueSystem) => "Error",
            (Language::Spanish, TextKey::IssueSystem) => "Error",
            (Language::English, TextKey::IssueValidation) => "Validation",
            (Language::Spanish, TextKey::IssueValidation) => "Validación",
            (Language::English, TextKey::IssuesNone) => "No messages",
            (Language::Spanish, TextKey::IssuesNone) => "Sin mensajes",
            (Language::English, TextKey::ServerUnknown) => "server ?",
            (Language::Spanish, TextKey::ServerUnknown) => "servidor ?",
            (Language::English, TextKey::ServerUp) => "server up",
            (Language::Spanish, TextKey::ServerUp) => "servidor activo",
            (Language::English, TextKey::ServerDown) => "server down",
            (Language::Spanish, TextKey::ServerDown) => "servidor caído",
            (Language::English, TextKey::WarnTitle) => "Terminal Too Small",
            (Language::Spanish, TextKey::WarnTitle) => "Terminal demasiado pequeña",
            (Language::English, TextKey::WarnCurrent) => "Current: ",
            (Language::Spanish, TextKey::WarnCurrent) => "Actual: ",
            (Language::English, TextKey::WarnRequired) => "Required: ",
            (Language::Spanish, TextKey::WarnRequired) => "Requerido: ",
            (Language::English, TextKey::WarnHint) => "Please resize your terminal",
            (Language::Spanish, TextKey::WarnHint) => "Amplía la ventana de la terminal",
            (Language::English, TextKey::DialogOpenFileTitle) => "Select File",
            (Language::Spanish, TextKey::DialogOpenFileTitle) => "Seleccionar archivo",
            (Language::English, TextKey::DialogOpenFilePrompt) => {
                "Excel file (.xlsx, .xls, .xlsm):"
            }
            (Language::Spanish, TextKey::DialogOpenFilePrompt) => {
                "Archivo Excel (.xlsx, .xls, .xlsm):"
            }
            (Language::English, TextKey::DialogSuggestions) => "Suggestions",
            (Language::Spanish, TextKey::DialogSuggestions) => "Sugerencias",
            (Language::English, TextKey::DialogSuggestionHint) => "Tab/Shift+Tab: cycle",
            (Language::Spanish, TextKey::DialogSuggestionHint) => "Tab/Shift+Tab: alternar",
            (Language::English, TextKey::DialogEditCellTitle) => "Edit Cell",
            (Language::Spanish, TextKey::DialogEditCellTitle) => "Editar celda",
            (Language::English, TextKey::DialogConfirmInsertTitle) => "Insert Data",
            (Language::Spanish, TextKey::DialogConfirmInsertTitle) => "Insertar datos",
            (Language::English, TextKey::DialogPreviewingTitle) => "Previewing",
            (Language::Spanish, TextKey::DialogPreviewingTitle) => "Previsualizando",
            (Language::English, TextKey::DialogInsertingTitle) => "Inserting",
            (Language::Spanish, TextKey::DialogInsertingTitle) => "Insertando",
            (Language::English, TextKey::DialogPleaseWait) => "Waiting for the server...",
            (Language::Spanish, TextKey::DialogPleaseWait) => "Esperando al servidor...",
            (Language::English, TextKey::DialogResultTitle) => "Insert Complete",
            (Language::Spanish, TextKey::DialogResultTitle) => "Inserción completada",
            (Language::English, TextKey::DialogStatsTitle) => "Server Statistics",
            (Language::Spanish, TextKey::DialogStatsTitle) => "Estadísticas del servidor",
            (Language::English, TextKey::DialogLogsTitle) => "Upload History",
            (Language::Spanish, TextKey::DialogLogsTitle) => "Historial de cargas",
            (Language::English, TextKey::DialogRecordsTitle) => "Stored Records",
            (Language::Spanish, TextKey::DialogRecordsTitle) => "Registros guardados",
            (Language::English, TextKey::DialogListEmpty) => "(No entries)",
            (Language::Spanish, TextKey::DialogListEmpty) => "(Sin entradas)",
            (Language::English, TextKey::DialogListHint) => "↑↓: Move  Esc: Close",
            (Language::Spanish, TextKey::DialogListHint) => "↑↓: Mover  Esc: Cerrar",
            (Language::English, TextKey::DialogKeyboardShortcutsTitle) => {
                " Keyboard Shortcuts "
            }
            (Language::Spanish, TextKey::DialogKeyboardShortcutsTitle) => " Atajos de teclado ",
            (Language::English, TextKey::DialogHelpHint) => "↑↓: Scroll  Esc: Close",
            (Language::Spanish, TextKey::DialogHelpHint) => "↑↓: Desplazar  Esc: Cerrar",
            (Language::English, TextKey::DialogErrorTitle) => "Error",
            (Language::Spanish, TextKey::DialogErrorTitle) => "Error",
            (Language::English, TextKey::StatsTotalRecords) => "Records stored",
            (Language::Spanish, TextKey::StatsTotalRecords) => "Registros guardados",
            (Language::English, TextKey::StatsTotalUploads) => "Uploads",
            (Language::Spanish, TextKey::StatsTotalUploads) => "Cargas",
            (Language::English, TextKey::StatsSuccessful) => "Successful",
            (Language::Spanish, TextKey::StatsSuccessful) => "Exitosas",
            (Language::English, TextKey::StatsFailed) => "Failed",
            (Language::Spanish, TextKey::StatsFailed) => "Fallidas",
            (Language::English, TextKey::StatsApiVersion) => "API version",
            (Language::Spanish, TextKey::StatsApiVersion) => "Versión de API",
        }
    }

    pub fn msg(self, key: MessageKey) -> &'static str {
        match (self.language, key) {
            (Language::English, MessageKey::ConfirmInsert) => {
                "Insert {rows} rows from sheet \"{sheet}\" of {file} into the database?"
            }
            (Language::Spanish, MessageKey::ConfirmInsert) => {
                "¿Insertar {rows} filas de la hoja \"{sheet}\" de {file} en la base de datos?"
            }
            (Language::English, MessageKey::ProgressRows) => "{done} / {total} rows",
            (Language::Spanish, MessageKey::ProgressRows) => "{done} / {total} filas",
            (Language::English, MessageKey::ResultBody) => {
                "{rows} rows inserted from {file}.\nBatch: {batch}"
            }
            (Language::Spanish, MessageKey::ResultBody) => {
                "{rows} filas insertadas desde {file}.\nLote: {batch}"
            }
            (Language::English, MessageKey::StatusTable) => {
                " {sheet} | {rows} rows x {columns} columns"
            }
            (Language::Spanish, MessageKey::StatusTable) => {
                " {sheet} | {rows} filas x {columns} columnas"
            }
            (Language::English, MessageKey::HelpTotal) => "Total: {count}",
            (Language::Spanish, MessageKey::HelpTotal) => "Total: {count}",
            (Language::English, MessageKey::ThemeToast) => "Theme: {name}",
            (Language::Spanish, MessageKey::ThemeToast) => "Tema: {name}",
            (Language::English, MessageKey::LanguageToast) => "Language: {name}",
            (Language::Spanish, MessageKey::LanguageToast) => "Idioma: {name}",
            (Language::English, MessageKey::RowDeletedToast) => "Row {index} deleted",
            (Language::Spanish, MessageKey::RowDeletedToast) => "Fila {index} eliminada",
            (Language::English, MessageKey::TableClearedToast) => "{count} rows removed",
            (Language::Spanish, MessageKey::TableClearedToast) => "{count} filas eliminadas",
            (Language::English, MessageKey::CellUpdatedToast) => "Cell updated: {column}",
            (Language::Spanish, MessageKey::CellUpdatedToast) => "Celda actualizada: {column}",
            (Language::English, MessageKey::ChartTitle) => "Chart: {column}",
            (Language::Spanish, MessageKey::ChartTitle) => "Gráfico: {column}",
            (Language::English, MessageKey::ChartDistinct) => "{count} distinct values",
            (Language::Spanish, MessageKey::ChartDistinct) => "{count} valores distintos",
            (Language::English, MessageKey::ValidationMissing) => "Missing: {columns}",
            (Language::Spanish, MessageKey::ValidationMissing) => "Faltan: {columns}",
            (Language::English, MessageKey::ValidationUnexpected) => "Extra: {columns}",
            (Language::Spanish, MessageKey::ValidationUnexpected) => "Extra: {columns}",
            (Language::English, MessageKey::EditCellPrompt) => "Row {row}, column \"{column}\":",
            (Language::Spanish, MessageKey::EditCellPrompt) => "Fila {row}, columna \"{column}\":",
            (Language::English, MessageKey::ServerHealthyToast) => "Server healthy ({database})",
            (Language::Spanish, MessageKey::ServerHealthyToast) => {
                "Servidor operativo ({database})"
            }
            (Language::English, MessageKey::ServerStatusToast) => "Server status: {status}",
            (Language::Spanish, MessageKey::ServerStatusToast) => "Estado del servidor: {status}",
            (Language::English, MessageKey::ListCount) => "{count} entries",
            (Language::Spanish, MessageKey::ListCount) => "{count} entradas",
        }
    }

    pub fn fmt(self, key: MessageKey, args: &[(&str, String)]) -> String {
        let mut out = self.msg(key).to_string();
        for (name, value) in args {
            let needle = format!("{{{}}}", name);
            out = out.replace(&needle, value);
        }
        out
    }

    /// 흐름 단계 라벨 (`LoaderPhase::id`)
    pub fn phase_label(self, id: &str) -> &'static str {
        match (self.language, id) {
            (Language::English, "idle") => "Idle",
            (Language::Spanish, "idle") => "En espera",
            (Language::English, "file_selected") => "File selected",
            (Language::Spanish, "file_selected") => "Archivo seleccionado",
            (Language::English, "previewing") => "Previewing...",
            (Language::Spanish, "previewing") => "Previsualizando...",
            (Language::English, "previewed") => "Ready to edit",
            (Language::Spanish, "previewed") => "Listo para editar",
            (Language::English, "confirming") => "Confirm insert",
            (Language::Spanish, "confirming") => "Confirmar inserción",
            (Language::English, "inserting") => "Inserting...",
            (Language::Spanish, "inserting") => "Insertando...",
            (Language::English, "completed") => "Inserted",
            (Language::Spanish, "completed") => "Insertado",
            _ => "",
        }
    }

    /// 커맨드바 라벨 (짧은 형태)
    pub fn command_label(self, id: &str, fallback: &'static str) -> &'static str {
        match (self.language, id) {
            (Language::English, _) => fallback,
            (Language::Spanish, "next_sheet") => "Hoja",
            (Language::Spanish, "open_file") => "Abrir",
            (Language::Spanish, "preview") => "Vista",
            (Language::Spanish, "insert") => "Insertar",
            (Language::Spanish, "edit_cell") => "Editar",
            (Language::Spanish, "delete_row") => "BorrarFila",
            (Language::Spanish, "chart_column") => "Gráfico",
            (Language::Spanish, "help") => "Ayuda",
            (Language::Spanish, "quit") => "Salir",
            _ => fallback,
        }
    }

    pub fn help_category(self, id: &str) -> &'static str {
        match (self.language, id) {
            (Language::English, "navigation") => "Navigation",
            (Language::Spanish, "navigation") => "Navegación",
            (Language::English, "workflow") => "Workflow",
            (Language::Spanish, "workflow") => "Flujo de carga",
            (Language::English, "table") => "Table",
            (Language::Spanish, "table") => "Tabla",
            (Language::English, "server") => "Server",
            (Language::Spanish, "server") => "Servidor",
            (Language::English, "system") => "System",
            (Language::Spanish, "system") => "Sistema",
            _ => "",
        }
    }

    /// 도움말 다이얼로그 액션 설명
    pub fn action_label(self, id: &str, fallback: &'static str) -> &'static str {
        match (self.language, id) {
            (Language::English, _) => fallback,
            (Language::Spanish, "move_up") => "Subir/bajar",
            (Language::Spanish, "move_down") => "Bajar",
            (Language::Spanish, "move_left") => "Columna anterior/siguiente",
            (Language::Spanish, "move_right") => "Columna siguiente",
            (Language::Spanish, "go_top") => "Primera fila",
            (Language::Spanish, "go_bottom") => "Última fila",
            (Language::Spanish, "page_up") => "Media página arriba/abajo",
            (Language::Spanish, "page_down") => "Media página abajo",
            (Language::Spanish, "next_sheet") => "Hoja siguiente/anterior",
            (Language::Spanish, "prev_sheet") => "Hoja anterior",
            (Language::Spanish, "open_file") => "Seleccionar archivo",
            (Language::Spanish, "preview") => "Previsualizar archivo",
            (Language::Spanish, "insert") => "Insertar en la base de datos",
            (Language::Spanish, "edit_cell") => "Editar celda",
            (Language::Spanish, "delete_row") => "Eliminar fila",
            (Language::Spanish, "clear_table") => "Vaciar tabla",
            (Language::Spanish, "chart_column") => "Graficar siguiente columna",
            (Language::Spanish, "dismiss_issues") => "Descartar mensajes",
            (Language::Spanish, "check_health") => "Comprobar servidor",
            (Language::Spanish, "server_stats") => "Estadísticas del servidor",
            (Language::Spanish, "upload_logs") => "Historial de cargas",
            (Language::Spanish, "recent_records") => "Registros guardados",
            (Language::Spanish, "help") => "Ayuda",
            (Language::Spanish, "cycle_theme") => "Cambiar tema",
            (Language::Spanish, "toggle_language") => "Cambiar idioma",
            (Language::Spanish, "quit") => "Salir",
            _ => fallback,
        }
    }
}

/// 런타임에 만들어진 영문 문구를 현재 언어로 변환
///
/// 서버가 보낸 `detail` 문구처럼 모르는 문자열은 그대로 돌려준다.
pub fn localize_runtime_text(language: Language, input: &str) -> String {
    if matches!(language, Language::English) {
        return input.to_string();
    }

    let exact = match input {
        "No data to insert. The table is empty." => {
            Some("No hay datos para insertar. La tabla está vacía.")
        }
        "Some sheets in the workbook are empty" => Some("Algunas hojas del libro están vacías"),
        "Error previewing file" => Some("Error al previsualizar el archivo"),
        "Error inserting data" => Some("Error al insertar los datos"),
        "Error contacting server" => Some("Error al contactar con el servidor"),
        "Another request is still running" => Some("Otra solicitud sigue en curso"),
        "Select a file first" => Some("Primero selecciona un archivo"),
        "Preview the file first" => Some("Primero previsualiza el archivo"),
        "This sheet was already inserted" => Some("Esta hoja ya fue insertada"),
        _ => None,
    };
    if let Some(msg) = exact {
        return msg.to_string();
    }

    if let Some(rest) = input.strip_prefix("Error previewing file: ") {
        return format!("Error al previsualizar el archivo: {}", rest);
    }
    if let Some(rest) = input.strip_prefix("Error inserting data: ") {
        return format!("Error al insertar los datos: {}", rest);
    }
    if let Some(rest) = input.strip_prefix("Error contacting server: ") {
        return format!("Error al contactar con el servidor: {}", rest);
    }
    if let Some(rest) = input.strip_prefix("Invalid file ") {
        return format!("Archivo no válido {}", rest);
    }
    if let Some(rest) = input.strip_prefix("None of the expected columns were found ") {
        let columns = rest
            .strip_suffix(". Check the selected sheet.")
            .unwrap_or(rest);
        return format!(
            "No se encontró ninguna columna esperada {}. Revisa la hoja seleccionada.",
            columns
        );
    }
    input.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::from_code("es"), Language::Spanish);
        assert_eq!(Language::from_code(" ES "), Language::Spanish);
        assert_eq!(Language::from_code("ko"), Language::English);
        assert_eq!(Language::Spanish.code(), "es");
        assert_eq!(Language::English.toggle(), Language::Spanish);
    }

    #[test]
    fn test_fmt_replaces_placeholders() {
        let text = I18n::new(Language::English).fmt(
            MessageKey::ConfirmInsert,
            &[
                ("rows", "3".to_string()),
                ("sheet", "Enero".to_string()),
                ("file", "ventas.xlsx".to_string()),
            ],
        );
        assert_eq!(
            text,
            "Insert 3 rows from sheet \"Enero\" of ventas.xlsx into the database?"
        );
    }

    #[test]
    fn test_phase_labels_cover_all_phases() {
        let i18n = I18n::new(Language::Spanish);
        for id in [
            "idle",
            "file_selected",
            "previewing",
            "previewed",
            "confirming",
            "inserting",
            "completed",
        ] {
            assert!(!i18n.phase_label(id).is_empty(), "missing label for {}", id);
        }
    }

    #[test]
    fn test_localize_runtime_text() {
        assert_eq!(
            localize_runtime_text(Language::Spanish, "No data to insert. The table is empty."),
            "No hay datos para insertar. La tabla está vacía."
        );
        assert_eq!(
            localize_runtime_text(Language::Spanish, "Error inserting data: timed out"),
            "Error al insertar los datos: timed out"
        );
        // 서버 메시지는 그대로
        assert_eq!(
            localize_runtime_text(Language::Spanish, "Only Excel files are allowed"),
            "Only Excel files are allowed"
        );
        assert_eq!(
            localize_runtime_text(Language::English, "Error previewing file"),
            "Error previewing file"
        );
    }
}
