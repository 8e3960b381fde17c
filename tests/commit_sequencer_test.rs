// ==========================================
// 工程文档管理系统 - 提交序列器集成测试
// ==========================================
// 覆盖: 校验 → 代码预检 → create/update → 逐个挂接与部分失败容忍
// ==========================================

use async_trait::async_trait;
use edms_project_wizard::config::WizardConfig;
use edms_project_wizard::domain::{
    CommitMode, EntityId, Member, Participant, ProjectDraft, ProjectPayload,
};
use edms_project_wizard::engine::{
    BackendError, CodeAvailability, CommitError, CommitSequencer, ProjectBackend,
};
use std::sync::Mutex;

// ==========================================
// MockBackend - 记录调用序列的测试桩
// ==========================================
#[derive(Default)]
struct MockBackend {
    calls: Mutex<Vec<String>>,
    code_taken: bool,
    create_fails: bool,
    // 挂接失败的 company_id / user_id
    failing_companies: Vec<EntityId>,
    failing_users: Vec<EntityId>,
}

impl MockBackend {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl ProjectBackend for MockBackend {
    async fn check_code_availability(&self, code: &str) -> Result<CodeAvailability, BackendError> {
        self.record(format!("check:{}", code));
        Ok(CodeAvailability {
            exists: self.code_taken,
            owner: self.code_taken.then(|| "Іваненко".to_string()),
            project_name: self.code_taken.then(|| "Old project".to_string()),
            is_deleted: false,
        })
    }

    async fn create_project(&self, payload: &ProjectPayload) -> Result<EntityId, BackendError> {
        self.record(format!("create:{}", payload.project_code));
        if self.create_fails {
            return Err(BackendError::Network("connection reset".to_string()));
        }
        Ok(100)
    }

    async fn update_project(
        &self,
        project_id: EntityId,
        _payload: &ProjectPayload,
    ) -> Result<(), BackendError> {
        self.record(format!("update:{}", project_id));
        Ok(())
    }

    async fn attach_participant(
        &self,
        project_id: EntityId,
        participant: &Participant,
    ) -> Result<(), BackendError> {
        self.record(format!("participant:{}:{}", project_id, participant.company_id));
        if self.failing_companies.contains(&participant.company_id) {
            return Err(BackendError::Rejected("company inactive".to_string()));
        }
        Ok(())
    }

    async fn attach_member(
        &self,
        project_id: EntityId,
        member: &Member,
    ) -> Result<(), BackendError> {
        self.record(format!("member:{}:{}", project_id, member.user_id));
        if self.failing_users.contains(&member.user_id) {
            return Err(BackendError::Rejected("user disabled".to_string()));
        }
        Ok(())
    }
}

// ==========================================
// 辅助函数: 草稿与参与方
// ==========================================
fn participant(id: EntityId, company_id: EntityId) -> Participant {
    Participant {
        id,
        company_id,
        company_name: Some(format!("Company {}", company_id)),
        contact_id: None,
        company_role_id: Some(1),
        is_primary: id == 1,
        notes: None,
    }
}

fn draft_with_participants() -> ProjectDraft {
    let mut draft = ProjectDraft::new();
    draft.set_name("Water Treatment Plant");
    draft.set_project_code("WTP-01");
    draft.toggle_discipline(1);
    draft.toggle_document_type(1, 10);
    draft.add_participant(participant(1, 201));
    draft.add_participant(participant(2, 202));
    draft.add_participant(participant(3, 203));
    draft.add_member(Member {
        id: 1,
        user_id: 42,
        role: "admin".to_string(),
    });
    draft
}

#[tokio::test]
async fn test_create_commits_then_attaches_sequentially() {
    let backend = MockBackend::default();
    let sequencer = CommitSequencer::new(backend);

    let draft = draft_with_participants();
    let outcome = sequencer.commit(&draft, CommitMode::Create).await.unwrap();

    assert_eq!(outcome.project_id, 100);
    assert!(outcome.fully_attached());
    // 调用顺序: 预检 → create → 参与单位（按暂存顺序）→ 成员
    assert_eq!(
        sequencer_calls(&sequencer),
        vec![
            "check:WTP-01",
            "create:WTP-01",
            "participant:100:201",
            "participant:100:202",
            "participant:100:203",
            "member:100:42",
        ]
    );
}

#[tokio::test]
async fn test_partial_attachment_failure_is_tolerated() {
    let backend = MockBackend {
        failing_companies: vec![202],
        ..Default::default()
    };
    let sequencer = CommitSequencer::new(backend);

    let draft = draft_with_participants();
    let outcome = sequencer.commit(&draft, CommitMode::Create).await.unwrap();

    // 项目本体成功；一家挂接失败不影响其余两家与成员
    assert_eq!(outcome.project_id, 100);
    assert_eq!(outcome.failed_participants.len(), 1);
    assert_eq!(outcome.failed_participants[0].0.company_id, 202);
    assert!(outcome.failed_members.is_empty());

    let calls = sequencer_calls(&sequencer);
    assert!(calls.contains(&"participant:100:203".to_string()));
    assert!(calls.contains(&"member:100:42".to_string()));
}

#[tokio::test]
async fn test_code_collision_aborts_before_create() {
    let backend = MockBackend {
        code_taken: true,
        ..Default::default()
    };
    let sequencer = CommitSequencer::new(backend);

    let draft = draft_with_participants();
    let err = sequencer
        .commit(&draft, CommitMode::Create)
        .await
        .unwrap_err();

    match err {
        CommitError::CodeTaken { code, owner, .. } => {
            assert_eq!(code, "WTP-01");
            assert_eq!(owner.as_deref(), Some("Іваненко"));
        }
        other => panic!("期望 CodeTaken，实际 {:?}", other),
    }
    // 预检失败即中止，无任何副作用
    assert_eq!(sequencer_calls(&sequencer), vec!["check:WTP-01"]);
}

#[tokio::test]
async fn test_preflight_can_be_disabled() {
    let backend = MockBackend {
        code_taken: true, // 预检关闭时不会被询问
        ..Default::default()
    };
    let config = WizardConfig {
        preflight_code_check: false,
        ..Default::default()
    };
    let sequencer = CommitSequencer::with_config(backend, config);

    let draft = draft_with_participants();
    let outcome = sequencer.commit(&draft, CommitMode::Create).await.unwrap();
    assert_eq!(outcome.project_id, 100);
    assert!(!sequencer_calls(&sequencer)
        .iter()
        .any(|c| c.starts_with("check:")));
}

#[tokio::test]
async fn test_create_failure_aborts_attachments() {
    let backend = MockBackend {
        create_fails: true,
        ..Default::default()
    };
    let sequencer = CommitSequencer::new(backend);

    let draft = draft_with_participants();
    let err = sequencer
        .commit(&draft, CommitMode::Create)
        .await
        .unwrap_err();
    assert!(matches!(err, CommitError::Backend(_)));

    // 本体失败后不得有任何挂接调用
    let calls = sequencer_calls(&sequencer);
    assert!(!calls.iter().any(|c| c.starts_with("participant:")));
    assert!(!calls.iter().any(|c| c.starts_with("member:")));
}

#[tokio::test]
async fn test_update_mode_skips_attachments() {
    let backend = MockBackend::default();
    let sequencer = CommitSequencer::new(backend);

    let draft = draft_with_participants();
    let outcome = sequencer
        .commit(&draft, CommitMode::Update(55))
        .await
        .unwrap();

    assert_eq!(outcome.project_id, 55);
    // 更新模式: 不预检、不挂接
    assert_eq!(sequencer_calls(&sequencer), vec!["update:55"]);
}

#[tokio::test]
async fn test_validation_precedes_backend_calls() {
    let backend = MockBackend::default();
    let sequencer = CommitSequencer::new(backend);

    let draft = ProjectDraft::new(); // 名称为空
    let err = sequencer
        .commit(&draft, CommitMode::Create)
        .await
        .unwrap_err();
    assert!(matches!(err, CommitError::Validation(_)));
    assert!(sequencer_calls(&sequencer).is_empty());
}

// 读取 MockBackend 的调用记录（序列器持有 backend 所有权）
fn sequencer_calls(sequencer: &CommitSequencer<MockBackend>) -> Vec<String> {
    sequencer.backend().calls()
}
