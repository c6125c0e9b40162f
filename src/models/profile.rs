use serde::Serialize;

/// The signed-in student shown on the dashboard.
#[derive(Serialize, Debug, Clone)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub major: String,
    pub year: String,
    pub gpa: f64,
    pub completed_credits: u32,
    pub required_credits: u32,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            email: "john.doe@university.edu".to_string(),
            major: "Computer Science".to_string(),
            year: "3rd Year".to_string(),
            gpa: 3.8,
            completed_credits: 92,
            required_credits: 128,
        }
    }
}

impl UserProfile {
    /// Share of required credits completed, as a whole percentage.
    pub fn graduation_progress(&self) -> u32 {
        if self.required_credits == 0 {
            return 0;
        }
        let ratio = f64::from(self.completed_credits) / f64::from(self.required_credits);
        (ratio * 100.0).round() as u32
    }
}
