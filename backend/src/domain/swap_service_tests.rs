//! Behavioural coverage for [`SwapService`] over mocked repositories.

use std::sync::Arc;

use chrono::Utc;
use rstest::rstest;
use uuid::Uuid;

use super::*;
use crate::domain::ports::{MockSkillLinkRepository, MockSwapRepository};
use crate::domain::{ErrorCode, OfferedSkill, Proficiency};

fn service(
    swaps: MockSwapRepository,
    skill_links: MockSkillLinkRepository,
) -> SwapService<MockSwapRepository, MockSkillLinkRepository> {
    SwapService::new(Arc::new(swaps), Arc::new(skill_links))
}

fn swap_with_status(
    requester_id: ProfileId,
    provider_id: ProfileId,
    status: SwapStatus,
) -> SkillSwap {
    let now = Utc::now();
    SkillSwap::new(SkillSwapDraft {
        id: Uuid::new_v4(),
        requester_id,
        provider_id,
        requested_skill_id: Uuid::new_v4(),
        offered_skill_id: Uuid::new_v4(),
        status,
        message: None,
        scheduled_date: None,
        created_at: now,
        updated_at: now,
    })
    .expect("valid swap")
}

fn offered(profile_id: ProfileId, skill_id: Uuid) -> OfferedSkill {
    OfferedSkill {
        profile_id,
        skill_id,
        proficiency: Proficiency::Intermediate,
    }
}

/// Link repository where each party offers exactly the expected skill.
fn links_offering(
    requester_id: ProfileId,
    requester_skill: Uuid,
    provider_id: ProfileId,
    provider_skill: Uuid,
) -> MockSkillLinkRepository {
    let mut links = MockSkillLinkRepository::new();
    links.expect_offered_skills().returning(move |id| {
        if id == requester_id {
            Ok(vec![offered(requester_id, requester_skill)])
        } else if id == provider_id {
            Ok(vec![offered(provider_id, provider_skill)])
        } else {
            Ok(Vec::new())
        }
    });
    links
}

#[rstest]
#[tokio::test]
async fn create_swap_persists_a_pending_swap() {
    let requester_id = ProfileId::random();
    let provider_id = ProfileId::random();
    let guitar = Uuid::new_v4();
    let python = Uuid::new_v4();

    let mut swaps = MockSwapRepository::new();
    swaps
        .expect_insert()
        .withf(move |swap| {
            swap.status() == SwapStatus::Pending
                && swap.requester_id() == requester_id
                && swap.provider_id() == provider_id
                && swap.requested_skill_id() == python
                && swap.offered_skill_id() == guitar
        })
        .returning(|swap| Ok(swap.clone()));

    let service = service(
        swaps,
        links_offering(requester_id, guitar, provider_id, python),
    );
    let created = service
        .create_swap(CreateSwapRequest {
            requester_id,
            provider_id,
            requested_skill_id: python,
            offered_skill_id: guitar,
            message: Some("trade you guitar lessons for Python help?".to_owned()),
        })
        .await
        .expect("swap created");

    assert_eq!(created.status(), SwapStatus::Pending);
    assert_eq!(
        created.message(),
        Some("trade you guitar lessons for Python help?")
    );
}

#[rstest]
#[tokio::test]
async fn create_swap_rejects_same_party() {
    let profile_id = ProfileId::random();
    let service = service(MockSwapRepository::new(), MockSkillLinkRepository::new());

    let err = service
        .create_swap(CreateSwapRequest {
            requester_id: profile_id,
            provider_id: profile_id,
            requested_skill_id: Uuid::new_v4(),
            offered_skill_id: Uuid::new_v4(),
            message: None,
        })
        .await
        .expect_err("self-swap refused");
    assert_eq!(err.code, ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn create_swap_requires_provider_to_offer_requested_skill() {
    let requester_id = ProfileId::random();
    let provider_id = ProfileId::random();
    let guitar = Uuid::new_v4();
    let python = Uuid::new_v4();

    // Provider offers nothing relevant.
    let service = service(
        MockSwapRepository::new(),
        links_offering(requester_id, guitar, provider_id, Uuid::new_v4()),
    );
    let err = service
        .create_swap(CreateSwapRequest {
            requester_id,
            provider_id,
            requested_skill_id: python,
            offered_skill_id: guitar,
            message: None,
        })
        .await
        .expect_err("provider must offer the requested skill");

    assert_eq!(err.code, ErrorCode::InvalidRequest);
    let details = err.details.expect("details name the failing party");
    assert_eq!(details["party"], "provider");
    assert_eq!(details["skillId"], python.to_string());
}

#[rstest]
#[tokio::test]
async fn create_swap_requires_requester_to_offer_their_skill() {
    let requester_id = ProfileId::random();
    let provider_id = ProfileId::random();
    let guitar = Uuid::new_v4();
    let python = Uuid::new_v4();

    let service = service(
        MockSwapRepository::new(),
        links_offering(requester_id, Uuid::new_v4(), provider_id, python),
    );
    let err = service
        .create_swap(CreateSwapRequest {
            requester_id,
            provider_id,
            requested_skill_id: python,
            offered_skill_id: guitar,
            message: None,
        })
        .await
        .expect_err("requester must offer the skill in return");

    assert_eq!(err.code, ErrorCode::InvalidRequest);
    let details = err.details.expect("details name the failing party");
    assert_eq!(details["party"], "requester");
}

#[rstest]
#[tokio::test]
async fn create_swap_rejects_over_long_message() {
    let requester_id = ProfileId::random();
    let provider_id = ProfileId::random();
    let guitar = Uuid::new_v4();
    let python = Uuid::new_v4();

    let service = service(
        MockSwapRepository::new(),
        links_offering(requester_id, guitar, provider_id, python),
    );
    let err = service
        .create_swap(CreateSwapRequest {
            requester_id,
            provider_id,
            requested_skill_id: python,
            offered_skill_id: guitar,
            message: Some("x".repeat(crate::domain::swaps::MESSAGE_MAX + 1)),
        })
        .await
        .expect_err("over-long message refused");
    assert_eq!(err.code, ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn provider_accepts_pending_swap_via_conditional_update() {
    let requester_id = ProfileId::random();
    let provider_id = ProfileId::random();
    let pending = swap_with_status(requester_id, provider_id, SwapStatus::Pending);
    let swap_id = pending.id();
    let accepted = swap_with_status(requester_id, provider_id, SwapStatus::Accepted);

    let mut swaps = MockSwapRepository::new();
    {
        let pending = pending.clone();
        swaps
            .expect_find_by_id()
            .withf(move |id| *id == swap_id)
            .returning(move |_| Ok(Some(pending.clone())));
    }
    swaps
        .expect_update_status()
        .withf(move |id, expected, new_status| {
            *id == swap_id
                && *expected == SwapStatus::Pending
                && *new_status == SwapStatus::Accepted
        })
        .returning(move |_, _, _| Ok(accepted.clone()));

    let service = service(swaps, MockSkillLinkRepository::new());
    let updated = service
        .transition_status(TransitionSwapRequest {
            swap_id,
            actor_id: provider_id,
            new_status: SwapStatus::Accepted,
        })
        .await
        .expect("provider accepts");
    assert_eq!(updated.status(), SwapStatus::Accepted);
}

#[rstest]
#[tokio::test]
async fn transition_on_missing_swap_is_not_found() {
    let mut swaps = MockSwapRepository::new();
    swaps.expect_find_by_id().returning(|_| Ok(None));

    let service = service(swaps, MockSkillLinkRepository::new());
    let err = service
        .transition_status(TransitionSwapRequest {
            swap_id: Uuid::new_v4(),
            actor_id: ProfileId::random(),
            new_status: SwapStatus::Accepted,
        })
        .await
        .expect_err("missing swap");
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn requester_may_not_accept_their_own_request() {
    let requester_id = ProfileId::random();
    let provider_id = ProfileId::random();
    let pending = swap_with_status(requester_id, provider_id, SwapStatus::Pending);
    let swap_id = pending.id();

    let mut swaps = MockSwapRepository::new();
    swaps
        .expect_find_by_id()
        .returning(move |_| Ok(Some(pending.clone())));
    // No update_status expectation: authorisation must fail first.

    let service = service(swaps, MockSkillLinkRepository::new());
    let err = service
        .transition_status(TransitionSwapRequest {
            swap_id,
            actor_id: requester_id,
            new_status: SwapStatus::Accepted,
        })
        .await
        .expect_err("requester cannot accept");
    assert_eq!(err.code, ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn strangers_may_not_transition_swaps() {
    let pending = swap_with_status(ProfileId::random(), ProfileId::random(), SwapStatus::Pending);
    let swap_id = pending.id();

    let mut swaps = MockSwapRepository::new();
    swaps
        .expect_find_by_id()
        .returning(move |_| Ok(Some(pending.clone())));

    let service = service(swaps, MockSkillLinkRepository::new());
    let err = service
        .transition_status(TransitionSwapRequest {
            swap_id,
            actor_id: ProfileId::random(),
            new_status: SwapStatus::Cancelled,
        })
        .await
        .expect_err("stranger refused");
    assert_eq!(err.code, ErrorCode::Forbidden);
}

#[rstest]
#[case(SwapStatus::Rejected)]
#[case(SwapStatus::Completed)]
#[case(SwapStatus::Cancelled)]
#[tokio::test]
async fn terminal_swaps_refuse_every_transition(#[case] terminal: SwapStatus) {
    let requester_id = ProfileId::random();
    let provider_id = ProfileId::random();
    let swap = swap_with_status(requester_id, provider_id, terminal);
    let swap_id = swap.id();

    let mut swaps = MockSwapRepository::new();
    swaps
        .expect_find_by_id()
        .returning(move |_| Ok(Some(swap.clone())));

    let service = service(swaps, MockSkillLinkRepository::new());
    for target in [
        SwapStatus::Accepted,
        SwapStatus::Rejected,
        SwapStatus::Completed,
        SwapStatus::Cancelled,
    ] {
        let err = service
            .transition_status(TransitionSwapRequest {
                swap_id,
                actor_id: provider_id,
                new_status: target,
            })
            .await
            .expect_err("terminal swap refuses transitions");
        assert_eq!(err.code, ErrorCode::Conflict);
        let details = err.details.expect("details carry both statuses");
        assert_eq!(details["currentStatus"], terminal.as_str());
        assert_eq!(details["targetStatus"], target.as_str());
    }
}

#[rstest]
#[tokio::test]
async fn racing_transition_surfaces_as_conflict() {
    let requester_id = ProfileId::random();
    let provider_id = ProfileId::random();
    let pending = swap_with_status(requester_id, provider_id, SwapStatus::Pending);
    let swap_id = pending.id();

    // Another actor cancelled between the read and the conditional write.
    let mut swaps = MockSwapRepository::new();
    swaps
        .expect_find_by_id()
        .returning(move |_| Ok(Some(pending.clone())));
    swaps.expect_update_status().returning(|_, _, _| {
        Err(SwapRepositoryError::StatusConflict {
            expected: SwapStatus::Pending,
            actual: SwapStatus::Cancelled,
        })
    });

    let service = service(swaps, MockSkillLinkRepository::new());
    let err = service
        .transition_status(TransitionSwapRequest {
            swap_id,
            actor_id: provider_id,
            new_status: SwapStatus::Accepted,
        })
        .await
        .expect_err("losing racer gets a conflict");
    assert_eq!(err.code, ErrorCode::Conflict);
    let details = err.details.expect("details carry both statuses");
    assert_eq!(details["expectedStatus"], "pending");
    assert_eq!(details["currentStatus"], "cancelled");
}

#[rstest]
#[tokio::test]
async fn full_lifecycle_happy_path() {
    let requester_id = ProfileId::random();
    let provider_id = ProfileId::random();
    let python = Uuid::new_v4();
    let guitar = Uuid::new_v4();

    // A stateful mock would obscure what is under test here; instead walk the
    // machine explicitly with one read-modify-write per edge.
    let mut swaps = MockSwapRepository::new();
    swaps.expect_insert().returning(|swap| Ok(swap.clone()));
    let service = service(
        swaps,
        links_offering(requester_id, guitar, provider_id, python),
    );
    let created = service
        .create_swap(CreateSwapRequest {
            requester_id,
            provider_id,
            requested_skill_id: python,
            offered_skill_id: guitar,
            message: None,
        })
        .await
        .expect("created");
    assert_eq!(created.status(), SwapStatus::Pending);

    for (from, to, actor) in [
        (SwapStatus::Pending, SwapStatus::Accepted, provider_id),
        (SwapStatus::Accepted, SwapStatus::Completed, requester_id),
    ] {
        let current = swap_with_status(requester_id, provider_id, from);
        let swap_id = current.id();
        let next = swap_with_status(requester_id, provider_id, to);
        let mut swaps = MockSwapRepository::new();
        swaps
            .expect_find_by_id()
            .returning(move |_| Ok(Some(current.clone())));
        swaps
            .expect_update_status()
            .withf(move |id, expected, new_status| {
                *id == swap_id && *expected == from && *new_status == to
            })
            .returning(move |_, _, _| Ok(next.clone()));
        let service = service_for_step(swaps);
        let updated = service
            .transition_status(TransitionSwapRequest {
                swap_id,
                actor_id: actor,
                new_status: to,
            })
            .await
            .expect("legal transition succeeds");
        assert_eq!(updated.status(), to);
    }
}

fn service_for_step(
    swaps: MockSwapRepository,
) -> SwapService<MockSwapRepository, MockSkillLinkRepository> {
    service(swaps, MockSkillLinkRepository::new())
}

#[rstest]
#[tokio::test]
async fn list_swaps_applies_the_requested_view() {
    let me = ProfileId::random();
    let other = ProfileId::random();
    let incoming = swap_with_status(other, me, SwapStatus::Pending);
    let outgoing = swap_with_status(me, other, SwapStatus::Pending);
    let active = swap_with_status(other, me, SwapStatus::Accepted);
    let all = vec![incoming.clone(), outgoing.clone(), active.clone()];

    let mut swaps = MockSwapRepository::new();
    swaps
        .expect_list_for_profile()
        .returning(move |_| Ok(all.clone()));

    let service = service(swaps, MockSkillLinkRepository::new());
    let listed = service
        .list_swaps(me, SwapView::Incoming)
        .await
        .expect("listing succeeds");
    assert_eq!(listed, vec![incoming]);

    let listed = service
        .list_swaps(me, SwapView::All)
        .await
        .expect("listing succeeds");
    assert_eq!(listed.len(), 3);
}

#[rstest]
#[tokio::test]
async fn repository_outage_is_service_unavailable() {
    let mut swaps = MockSwapRepository::new();
    swaps
        .expect_list_for_profile()
        .returning(|_| Err(SwapRepositoryError::connection("pool exhausted")));

    let service = service(swaps, MockSkillLinkRepository::new());
    let err = service
        .list_swaps(ProfileId::random(), SwapView::All)
        .await
        .expect_err("outage surfaces");
    assert_eq!(err.code, ErrorCode::ServiceUnavailable);
}
