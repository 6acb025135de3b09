/// Events that drive the wizard.
///
/// 驱动向导的事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// The wizard screen mounted (or restarted).
    Mount,
    /// The active step registered a submit handler.
    HandlerRegistered,
    /// The active step cleared its submit handler.
    HandlerCleared,
    /// The active step reported its local validation state.
    StepValidityChanged { valid: bool },
    /// The active step recorded (or cleared) a user-visible error.
    ErrorReported { message: Option<String> },
    /// The user pressed advance.
    AdvanceRequested { handler_registered: bool },
    /// The awaited handler resolved to `true`.
    SubmissionSucceeded,
    /// The awaited handler resolved to `false` (`error: None`) or failed.
    SubmissionFailed {
        error: Option<String>,
        handler_registered: bool,
    },
    /// The newly active step finished mounting.
    StepEntered,
    /// The user pressed previous.
    RetreatRequested,
    /// The user cancelled the wizard.
    CancelRequested,
}
