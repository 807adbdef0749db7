use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create an account, send the verification email and store the profile
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        /// Full name in English
        #[arg(long)]
        name: String,
        /// Full name in Arabic
        #[arg(long)]
        name_arabic: String,
        /// Birth date as YYYY-MM-DD
        #[arg(long)]
        birth_date: String,
        #[arg(long)]
        phone: String,
    },

    /// Sign in with email and password
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign in with a Google account
    SignInGoogle {
        /// Google ID token (prompted on stdin when omitted)
        #[arg(long)]
        id_token: Option<String>,
    },

    /// Sign out and forget the saved session
    SignOut,

    /// Send the verification email again
    ResendVerification,

    /// Email a password reset link
    ResetPassword {
        #[arg(long)]
        email: String,
    },

    /// Re-fetch the account, e.g. after following the verification link
    Reload,

    /// Show the signed-in user
    Whoami,

    /// Show the stored profile of the signed-in user
    Profile,

    /// Print every identity change until Ctrl+C
    Watch,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Register { .. } => "register",
            Self::SignIn { .. } => "sign-in",
            Self::SignInGoogle { .. } => "sign-in-google",
            Self::SignOut => "sign-out",
            Self::ResendVerification => "resend-verification",
            Self::ResetPassword { .. } => "reset-password",
            Self::Reload => "reload",
            Self::Whoami => "whoami",
            Self::Profile => "profile",
            Self::Watch => "watch",
        }
    }
}
