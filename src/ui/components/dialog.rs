// Dialog component - 모달 다이얼로그
//
// 파일 경로 입력, 셀 편집, 적재 확인, 진행률, 결과/에러, 서버 조회 목록, 도움말

mod builders;
mod kind;
mod render;

pub use kind::{DialogKind, InputPurpose, ListKind, ProgressStage};
pub use render::Dialog;
