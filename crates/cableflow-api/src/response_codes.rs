// Response-code explanation tables
//
// The controller signals the outcome of a configuration change only through
// its HTTP status. Each table maps the statuses documented for one operation
// to a human-readable explanation; anything else has no explanation.

/// Which operation's documented status codes to consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseTable {
    FlowAdd,
    FlowDelete,
    CmtsAdd,
    CmtsDelete,
}

impl ResponseTable {
    /// Explanation for `status`, or `None` if the code is undocumented.
    pub fn explain(self, status: u16) -> Option<&'static str> {
        match self {
            Self::FlowAdd => flow_add(status),
            Self::FlowDelete => flow_delete(status),
            Self::CmtsAdd => cmts_add(status),
            Self::CmtsDelete => cmts_delete(status),
        }
    }
}

fn flow_add(status: u16) -> Option<&'static str> {
    Some(match status {
        201 => "Flow Config processed successfully",
        400 => "Failed to create Static Flow entry due to invalid flow configuration",
        401 => "User not authorized to perform this operation",
        404 => "The Container Name or nodeId is not found",
        406 => "Cannot operate on Default Container when other Containers are active",
        409 => "Failed to create Static Flow entry due to Conflicting Name or configuration",
        500 => "Failed to create Static Flow entry. Failure Reason included in HTTP Error response",
        503 => "One or more of Controller services are unavailable",
        _ => return None,
    })
}

fn flow_delete(status: u16) -> Option<&'static str> {
    Some(match status {
        204 => "Flow Config deleted successfully",
        401 => "User not authorized to perform this operation",
        404 => "The Container Name or Node-id or Flow Name passed is not found",
        406 => {
            "Failed to delete Flow config due to invalid operation. \
             Failure details included in HTTP Error response"
        }
        500 => "Failed to delete Flow config. Failure Reason included in HTTP Error response",
        503 => "One or more of Controller service is unavailable",
        _ => return None,
    })
}

fn cmts_add(status: u16) -> Option<&'static str> {
    Some(match status {
        200 | 201 => "CMTS Config processed successfully",
        400 => "Failed to create CMTS entry due to invalid CMTS configuration",
        401 => "User not authorized to perform this operation",
        404 => "The Container Name or nodeId is not found",
        409 => "Failed to create CMTS entry due to Conflicting Name or configuration",
        500 => "Failed to create CMTS entry. Failure Reason included in HTTP Error response",
        503 => "One or more of Controller services are unavailable",
        _ => return None,
    })
}

fn cmts_delete(status: u16) -> Option<&'static str> {
    Some(match status {
        200 | 204 => "CMTS Config deleted successfully",
        401 => "User not authorized to perform this operation",
        404 => "The Container Name or Node-id passed is not found",
        500 => "Failed to delete CMTS config. Failure Reason included in HTTP Error response",
        503 => "One or more of Controller service is unavailable",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::ResponseTable;

    #[test]
    fn flow_add_documented_codes() {
        let t = ResponseTable::FlowAdd;
        assert_eq!(t.explain(201), Some("Flow Config processed successfully"));
        assert_eq!(
            t.explain(400),
            Some("Failed to create Static Flow entry due to invalid flow configuration")
        );
        assert_eq!(
            t.explain(401),
            Some("User not authorized to perform this operation")
        );
        assert_eq!(
            t.explain(404),
            Some("The Container Name or nodeId is not found")
        );
        assert_eq!(
            t.explain(406),
            Some("Cannot operate on Default Container when other Containers are active")
        );
        assert_eq!(
            t.explain(409),
            Some("Failed to create Static Flow entry due to Conflicting Name or configuration")
        );
        assert_eq!(
            t.explain(500),
            Some(
                "Failed to create Static Flow entry. Failure Reason included in HTTP Error response"
            )
        );
        assert_eq!(
            t.explain(503),
            Some("One or more of Controller services are unavailable")
        );
    }

    #[test]
    fn flow_delete_documented_codes() {
        let t = ResponseTable::FlowDelete;
        assert_eq!(t.explain(204), Some("Flow Config deleted successfully"));
        assert_eq!(
            t.explain(404),
            Some("The Container Name or Node-id or Flow Name passed is not found")
        );
        assert_eq!(
            t.explain(406),
            Some(
                "Failed to delete Flow config due to invalid operation. \
                 Failure details included in HTTP Error response"
            )
        );
        assert_eq!(
            t.explain(503),
            Some("One or more of Controller service is unavailable")
        );
    }

    #[test]
    fn undocumented_codes_have_no_explanation() {
        for table in [
            ResponseTable::FlowAdd,
            ResponseTable::FlowDelete,
            ResponseTable::CmtsAdd,
            ResponseTable::CmtsDelete,
        ] {
            assert_eq!(table.explain(418), None);
            assert_eq!(table.explain(302), None);
        }
        // Success codes are operation-specific.
        assert_eq!(ResponseTable::FlowAdd.explain(204), None);
        assert_eq!(ResponseTable::FlowDelete.explain(201), None);
    }
}
