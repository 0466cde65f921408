//! Four-step design brief wizard: requirements, style quiz, photos, review.

use super::{Notice, PageState};
use crate::annotation::IdAllocator;
use crate::components::{FileUpload, SelectedFile, UploadOutcome};
use crate::error::{ServiceError, ServiceResult};
use crate::store::Services;
use shared_types::{Brief, CreateBriefRequest, Photo};
use tracing::info;
use uuid::Uuid;

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 4;

pub const ROOM_OPTIONS: [&str; 6] = [
    "Living Room",
    "Kitchen",
    "Bedroom",
    "Bathroom",
    "Dining Room",
    "Office",
];

pub const BUDGET_RANGES: [&str; 4] = ["10000-25000", "25000-50000", "50000-100000", "100000+"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizQuestion {
    pub id: &'static str,
    pub question: &'static str,
    pub options: &'static [QuizOption],
}

impl QuizQuestion {
    pub fn option(&self, value: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

const fn opt(value: &'static str, label: &'static str) -> QuizOption {
    QuizOption { value, label }
}

pub static STYLE_QUIZ: [QuizQuestion; 4] = [
    QuizQuestion {
        id: "style",
        question: "What's your preferred design style?",
        options: &[
            opt("modern", "Modern"),
            opt("traditional", "Traditional"),
            opt("scandinavian", "Scandinavian"),
            opt("industrial", "Industrial"),
            opt("bohemian", "Bohemian"),
            opt("minimalist", "Minimalist"),
        ],
    },
    QuizQuestion {
        id: "colors",
        question: "Which color palette appeals to you?",
        options: &[
            opt("neutral", "Neutral Tones"),
            opt("bold", "Bold Colors"),
            opt("pastels", "Soft Pastels"),
            opt("monochrome", "Black & White"),
            opt("earth", "Earth Tones"),
            opt("jewel", "Jewel Tones"),
        ],
    },
    QuizQuestion {
        id: "lighting",
        question: "What lighting do you prefer?",
        options: &[
            opt("natural", "Natural Light"),
            opt("warm", "Warm & Cozy"),
            opt("bright", "Bright & Energetic"),
            opt("ambient", "Ambient Mood"),
        ],
    },
    QuizQuestion {
        id: "furniture",
        question: "What furniture style do you like?",
        options: &[
            opt("contemporary", "Contemporary"),
            opt("vintage", "Vintage"),
            opt("custom", "Custom Built"),
            opt("mixed", "Mixed Styles"),
        ],
    },
];

pub struct BriefPage {
    services: Services,
    pub state: PageState,
    pub notice: Option<Notice>,
    pub step: u8,
    /// Prefilled from the first stored brief when there is one
    pub draft: CreateBriefRequest,
    photos: Vec<Photo>,
    upload: FileUpload,
    ids: IdAllocator,
    pub submitted: Option<Brief>,
}

impl BriefPage {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            state: PageState::Loading,
            notice: None,
            step: FIRST_STEP,
            draft: CreateBriefRequest::default(),
            photos: Vec::new(),
            upload: FileUpload::default(),
            ids: IdAllocator::from_clock(),
            submitted: None,
        }
    }

    pub async fn load(&mut self) {
        self.state = PageState::Loading;
        let result = self.services.briefs.get_all().await;
        self.state = PageState::settle(&result, "Failed to load brief data");
        if let Some(brief) = result.ok().and_then(|briefs| briefs.into_iter().next()) {
            self.draft = CreateBriefRequest {
                rooms: brief.rooms,
                style_quiz_answers: brief.style_quiz_answers,
                requirements: brief.requirements,
                budget: brief.budget,
                photos: Vec::new(),
            };
        }
    }

    pub async fn retry(&mut self) {
        self.load().await
    }

    pub fn next_step(&mut self) -> u8 {
        self.step = (self.step + 1).min(LAST_STEP);
        self.step
    }

    pub fn prev_step(&mut self) -> u8 {
        self.step = self.step.saturating_sub(1).max(FIRST_STEP);
        self.step
    }

    pub fn toggle_room(&mut self, room: &str) {
        if let Some(index) = self.draft.rooms.iter().position(|r| r == room) {
            self.draft.rooms.remove(index);
        } else {
            self.draft.rooms.push(room.to_string());
        }
    }

    pub fn answer(&mut self, question_id: &str, value: &str) -> ServiceResult<()> {
        let question = STYLE_QUIZ
            .iter()
            .find(|q| q.id == question_id)
            .ok_or_else(|| {
                ServiceError::validation("style_quiz_answers", format!("Unknown question {}", question_id))
            })?;
        if question.option(value).is_none() {
            return Err(ServiceError::validation(
                "style_quiz_answers",
                format!("{} is not an option for {}", value, question_id),
            ));
        }

        self.draft
            .style_quiz_answers
            .insert(question_id.to_string(), value.to_string());
        Ok(())
    }

    pub fn answered(&self, question_id: &str) -> Option<&str> {
        self.draft.style_quiz_answers.get(question_id).map(String::as_str)
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn upload(&mut self, files: Vec<SelectedFile>) -> UploadOutcome {
        let outcome = self.upload.select(files);
        for file in &outcome.accepted {
            self.photos.push(Photo {
                id: self.ids.next_id(),
                name: file.name.clone(),
                url: format!("blob:{}", Uuid::new_v4()),
                annotations: Vec::new(),
            });
        }
        if !outcome.accepted.is_empty() {
            self.notice = Some(Notice::success(format!(
                "{} photos uploaded successfully",
                outcome.accepted.len()
            )));
        }
        outcome
    }

    pub fn remove_photo(&mut self, photo_id: i64) -> bool {
        let before = self.photos.len();
        self.photos.retain(|p| p.id != photo_id);
        let removed = self.photos.len() != before;
        if removed {
            self.notice = Some(Notice::success("Photo removed"));
        }
        removed
    }

    pub async fn submit(&mut self) -> ServiceResult<Brief> {
        let mut request = self.draft.clone();
        request.photos = self.photos.clone();

        let result = self.services.briefs.create(request).await;
        self.notice = Some(Notice::outcome(
            &result,
            "Brief submitted successfully!",
            "Failed to submit brief",
        ));
        if let Ok(brief) = &result {
            info!("Brief {} submitted with {} photos", brief.id, brief.photos.len());
            self.step = LAST_STEP;
            self.submitted = Some(brief.clone());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::testing::services;
    use crate::pages::NoticeLevel;

    #[test]
    fn test_quiz_has_four_questions() {
        let ids: Vec<&str> = STYLE_QUIZ.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec!["style", "colors", "lighting", "furniture"]);
        assert_eq!(STYLE_QUIZ[0].options.len(), 6);
        assert_eq!(STYLE_QUIZ[2].options.len(), 4);
    }

    #[tokio::test]
    async fn test_steps_are_clamped() {
        let (_store, services) = services();
        let mut page = BriefPage::new(services);

        assert_eq!(page.prev_step(), 1);
        for _ in 0..6 {
            page.next_step();
        }
        assert_eq!(page.step, 4);
        assert_eq!(page.prev_step(), 3);
    }

    #[tokio::test]
    async fn test_answers_must_be_known_options() {
        let (_store, services) = services();
        let mut page = BriefPage::new(services);

        page.answer("style", "scandinavian").unwrap();
        assert_eq!(page.answered("style"), Some("scandinavian"));

        assert!(page.answer("style", "baroque").unwrap_err().is_validation());
        assert!(page.answer("mood", "calm").unwrap_err().is_validation());
        assert_eq!(page.answered("style"), Some("scandinavian"));
    }

    #[tokio::test]
    async fn test_submit_creates_brief_with_photos() {
        let (_store, services) = services();
        let mut page = BriefPage::new(services.clone());
        page.load().await;
        assert!(page.state.is_ready());

        page.toggle_room("Kitchen");
        page.toggle_room("Office");
        page.toggle_room("Office");
        page.answer("lighting", "warm").unwrap();
        page.draft.budget = BUDGET_RANGES[1].to_string();
        let outcome = page.upload(vec![
            SelectedFile::new("kitchen.jpg", "image/jpeg", 2048),
            SelectedFile::new("notes.pdf", "application/pdf", 10),
        ]);
        assert_eq!(outcome.rejected.len(), 1);

        let brief = page.submit().await.unwrap();
        assert_eq!(page.step, 4);
        assert_eq!(brief.rooms, vec!["Kitchen"]);
        assert_eq!(brief.photos.len(), 1);
        assert_eq!(page.notice.as_ref().unwrap().level, NoticeLevel::Success);

        let mut reloaded = BriefPage::new(services);
        reloaded.load().await;
        assert_eq!(reloaded.draft.budget, "25000-50000");
        assert_eq!(reloaded.answered("lighting"), Some("warm"));
    }
}
