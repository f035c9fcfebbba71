// Model exports
pub mod aptitude;
pub mod domain;
pub mod requests;
pub mod responses;

pub use aptitude::{AnswerDetail, PublicQuestion, Question, TestRecord, TestResult};
pub use domain::{
    fold_exam, AuditAction, AuditRecord, College, CollegeSummary, Eligibility, Exclusion,
    ExclusionStats, MatchOptions, StudentProfile,
};
pub use requests::{
    ActorQuery, AddAdminRequest, AdminCheckQuery, AuditQuery, CollegeListQuery,
    MatchCollegesRequest, NewCollegeRequest,
    NewStudentRequest, SubmitTestRequest, UpdateCollegeRequest,
};
pub use responses::{
    AdminCheckResponse, ErrorResponse, HealthResponse, MatchCollegesResponse, MutationResponse,
    StudentResponse, SubmitTestResponse,
};
