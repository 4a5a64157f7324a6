include!("./_lib.rs");

use notes_core::app::App;
use notes_core::dispatch;

/// Send a message through the dispatcher, returning the parsed response
fn dispatch_raw(app: &mut App, msg: Value) -> Value {
    let res = dispatch::process(app, &msg.to_string());
    serde_json::from_str(&res).unwrap()
}

/// Send a message that must succeed, returning its data
fn dispatch_ass(app: &mut App, msg: Value) -> Value {
    let res = dispatch_raw(app, msg);
    assert_eq!(res["e"], 0, "error response: {}", res);
    res["d"].clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    use notes_core::store::LocalStore;

    fn note_ids(view: &Value) -> Vec<String> {
        view["blocks"].as_array().unwrap().iter()
            .filter(|x| x["type"] == "note")
            .map(|x| String::from(x["data"]["id"].as_str().unwrap()))
            .collect()
    }

    #[test]
    fn ping_pong() {
        let mut app = App::offline(LocalStore::new());
        let res = dispatch_raw(&mut app, json!(["42", "ping"]));
        assert_eq!(res, json!({"id": "42", "e": 0, "d": "pong"}));
    }

    #[test]
    fn archive_flow() {
        let mut app = App::offline(LocalStore::sample());
        let home = dispatch_ass(&mut app, json!(["1", "page:load", "home"]));
        assert_eq!(home["page"], "home");
        assert_eq!(home["state"], "displayed");
        assert_eq!(home["container"], "home-container");
        let ids = note_ids(&home);
        assert_eq!(ids.len(), 4);

        let home = dispatch_ass(&mut app, json!(["2", "note:archive", ids[0], "home"]));
        assert_eq!(note_ids(&home).len(), 3);
        let controls = &home["blocks"][0]["data"]["controls"];
        assert_eq!(controls[0]["action"], "archive");
        assert_eq!(controls[1]["action"], "delete");

        let archive = dispatch_ass(&mut app, json!(["3", "page:load", "archive"]));
        assert!(note_ids(&archive).contains(&ids[0]));

        let archive = dispatch_ass(&mut app, json!(["4", "note:unarchive", ids[0], "archive"]));
        assert!(!note_ids(&archive).contains(&ids[0]));
    }

    #[test]
    fn actions_outside_the_view_fail() {
        let mut app = App::offline(LocalStore::sample());
        dispatch_ass(&mut app, json!(["1", "page:load", "home"]));
        // the archived sample note isn't on the home page
        let res = dispatch_raw(&mut app, json!(["2", "note:unarchive", "notes-LMN-456789", "home"]));
        assert_eq!(res["e"], 1);
        let res = dispatch_raw(&mut app, json!(["3", "note:delete"]));
        assert_eq!(res["e"], 1);
        assert_eq!(res["d"], "missing field: missing argument (2)");
    }

    #[test]
    fn add_note_via_modal() {
        let mut app = App::offline(LocalStore::new());
        let modal = dispatch_ass(&mut app, json!(["1", "modal:open"]));
        assert_eq!(modal["open"], true);

        let res = dispatch_raw(&mut app, json!(["2", "note:add", {"title": "", "body": "x"}]));
        assert_eq!(res["e"], 1);
        assert_eq!(res["d"]["alerts"], json!(["Title and body are required"]));
        let list = dispatch_ass(&mut app, json!(["3", "page:view", "list"]));
        // alerts only show up once
        assert_eq!(list["alerts"], json!([]));
        assert_eq!(list["modal"]["open"], true);
        assert_eq!(list["modal"]["body"], "x");
        let list = dispatch_ass(&mut app, json!(["4", "page:view"]));
        assert_eq!(list["alerts"], json!([]));

        let note = dispatch_ass(&mut app, json!(["5", "note:add", "Groceries", "milk"]));
        assert_eq!(note["title"], "Groceries");
        assert_eq!(note["archived"], false);
        let list = dispatch_ass(&mut app, json!(["6", "page:view"]));
        assert_eq!(list["modal"]["open"], false);
        assert_eq!(note_ids(&list), vec![String::from(note["id"].as_str().unwrap())]);

        let modal = dispatch_ass(&mut app, json!(["7", "modal:close"]));
        assert_eq!(modal["open"], false);
    }

    #[test]
    fn online_failed_delete_alerts_right_away() {
        let (api, _script) = scripted(vec![
            list_reply(vec![note_json("a", "T1", "B1", false)]),
            reply(404, json!({"status": "fail", "message": "Note is not found"})),
            list_reply(vec![]),
        ]);
        let mut app = App::online(api, None);
        dispatch_ass(&mut app, json!(["1", "page:load"]));
        let res = dispatch_raw(&mut app, json!(["2", "note:delete", "a"]));
        assert_eq!(res["e"], 1);
        assert_eq!(res["d"]["error"], "not found: a");
        assert_eq!(res["d"]["alerts"], json!(["Failed to delete note"]));
        let list = dispatch_ass(&mut app, json!(["3", "page:view"]));
        assert_eq!(note_ids(&list), Vec::<String>::new());
    }

    #[test]
    fn delete_note() {
        let mut app = App::offline(LocalStore::sample());
        let list = dispatch_ass(&mut app, json!(["1", "page:load"]));
        let ids = note_ids(&list);
        let list = dispatch_ass(&mut app, json!(["2", "note:delete", ids[1]]));
        let after = note_ids(&list);
        assert_eq!(after.len(), ids.len() - 1);
        assert!(!after.contains(&ids[1]));
    }

    #[test]
    fn empty_pages_show_placeholder() {
        let mut app = App::offline(LocalStore::new());
        let view = dispatch_ass(&mut app, json!(["1", "page:load", "archive"]));
        assert_eq!(view["blocks"], json!([{"type": "placeholder", "data": "No notes available"}]));
    }

    #[test]
    fn online_feedback_and_endpoint() {
        let (api, script) = scripted(vec![list_reply(vec![note_json("a", "T1", "B1", false)])]);
        let mut app = App::online(api, None);
        dispatch_ass(&mut app, json!(["1", "app:api:set-endpoint", "http://127.0.0.1:8181/v2/"]));
        let list = dispatch_ass(&mut app, json!(["2", "page:load", "list"]));
        assert_eq!(note_ids(&list), vec![String::from("a")]);
        assert_eq!(script.requests(), vec![String::from("GET http://127.0.0.1:8181/v2/notes")]);

        let toasts = dispatch_ass(&mut app, json!(["3", "feedback:list"]));
        assert_eq!(toasts, json!([{"message": "Notes loaded successfully!", "tone": "success"}]));
    }
}
