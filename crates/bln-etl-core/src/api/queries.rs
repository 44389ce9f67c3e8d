//! GraphQL documents sent by the client.

pub(crate) const USER_PROJECTS: &str = r"
query {
    user {
        effectiveProjectRoles {
            edges {
                node {
                    role
                    project {
                        id
                        name
                        contactMethod
                        contact
                        description
                        isOpen
                        createdAt
                        updatedAt
                    }
                }
            }
        }
    }
}
";

pub(crate) const OPEN_PROJECTS: &str = r"
query {
    openProjects {
        edges {
            node {
                id
                name
                description
                contact
                contactMethod
                createdAt
                updatedAt
                isOpen
            }
        }
    }
}
";

pub(crate) const PROJECT: &str = r"
query Node($id: ID!) {
    node(id: $id) {
        ... on Project {
            id
            name
            description
            contact
            contactMethod
            createdAt
            updatedAt
            isOpen
        }
    }
}
";

pub(crate) const PROJECT_FILES: &str = r"
query Node($id: ID!) {
    node(id: $id) {
        ... on Project {
            id
            name
            files {
                name
            }
        }
    }
}
";

pub(crate) const CREATE_PROJECT: &str = r"
mutation CreateProject($input: CreateProjectInput!) {
    createProject(input: $input) {
        ok {
            id
            name
            description
            contact
            contactMethod
            isOpen
            updatedAt
        }
        err
    }
}
";

pub(crate) const DELETE_FILE: &str = r"
mutation DeleteFile($input: FileURIInput!) {
    deleteFile(input: $input) {
        ok
        err
        __typename
    }
}
";

pub(crate) const CREATE_FILE_UPLOAD_URI: &str = r"
mutation CreateFileUploadUri($input: FileURIInput!) {
    createFileUploadUri(input: $input) {
        ok {
            name
            uri
        }
        err
    }
}
";
